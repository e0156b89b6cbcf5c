use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knapfolio_core::config::Settings;
use knapfolio_core::domain::asset::{Asset, FrontierPoint};
use knapfolio_core::domain::contract::{FrontierRequest, SelectionRequest};
use knapfolio_core::engine;
use knapfolio_core::report::SelectionReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let app = router(AppState {
        settings: Arc::new(settings),
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/select", post(select_assets))
        .route("/frontier", post(trace_frontier))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    settings: Arc<Settings>,
}

#[derive(Debug, Serialize)]
struct ApiSelection {
    /// Knapsack output before the risk filter.
    selection: Vec<Asset>,
    report: SelectionReport,
}

#[derive(Debug, Serialize)]
struct ApiFrontier {
    points: Vec<FrontierPoint>,
}

async fn select_assets(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<ApiSelection>, StatusCode> {
    if let Err(e) = req.validate(&state.settings.limits()) {
        tracing::warn!(error = %e, "rejected selection request");
        return Err(StatusCode::BAD_REQUEST);
    }

    let SelectionRequest {
        assets,
        capital,
        tolerance,
    } = req;
    let assets_len = assets.len();
    let selection = run_blocking("selection", move || engine::select(&assets, capital)).await?;
    let filtered = engine::filter_by_risk(&selection, tolerance);
    tracing::info!(
        assets = assets_len,
        capital,
        tolerance,
        selected = selection.len(),
        kept = filtered.len(),
        "selection computed"
    );

    let report = SelectionReport::assemble(filtered, capital, tolerance, chrono::Utc::now());
    Ok(Json(ApiSelection { selection, report }))
}

async fn trace_frontier(
    State(state): State<AppState>,
    Json(req): Json<FrontierRequest>,
) -> Result<Json<ApiFrontier>, StatusCode> {
    if let Err(e) = req.validate(&state.settings.limits()) {
        tracing::warn!(error = %e, "rejected frontier request");
        return Err(StatusCode::BAD_REQUEST);
    }

    let FrontierRequest { assets, capital } = req;
    let points = run_blocking("frontier sweep", move || engine::sweep(&assets, capital)).await?;

    tracing::info!(capital, points = points.len(), "frontier computed");
    Ok(Json(ApiFrontier { points }))
}

/// Runs a knapsack-backed computation off the async workers; its table can be large near the
/// configured limits.
async fn run_blocking<T, F>(stage: &'static str, f: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        let err = anyhow::Error::new(e).context(format!("{stage} task failed"));
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(stage, error = %err, "blocking task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
