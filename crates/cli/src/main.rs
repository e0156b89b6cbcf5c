use anyhow::Context;
use clap::{Parser, ValueEnum};
use knapfolio_core::catalog;
use knapfolio_core::domain::asset::FrontierPoint;
use knapfolio_core::engine;
use knapfolio_core::render::renderer_for_path;
use knapfolio_core::report::SelectionReport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "knapfolio")]
struct Args {
    /// Capital budget; the knapsack table grows linearly with it.
    #[arg(long)]
    capital: u64,

    /// Risk tolerance; selected assets scoring above it are dropped from the report.
    #[arg(long, allow_negative_numbers = true)]
    risk: i64,

    /// Asset catalog (Ticker, ExpectedReturn(%), RiskScore(0-100), Price).
    #[arg(long)]
    csv: PathBuf,

    /// Also sweep tolerances 0..=100 and write the risk/return frontier.
    #[arg(long)]
    plot: bool,

    /// Frontier output path. `.json` writes JSON, anything else CSV.
    /// Defaults to KNAPFOLIO_FRONTIER_PATH, then `frontier.csv`.
    #[arg(long)]
    frontier_out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = knapfolio_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, &args) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "knapfolio run failed");
        return Err(err);
    }
    Ok(())
}

fn run(settings: &knapfolio_core::config::Settings, args: &Args) -> anyhow::Result<()> {
    let capital = settings.require_capital_within(args.capital)?;

    anyhow::ensure!(
        args.csv.exists(),
        "CSV file not found: {}",
        args.csv.display()
    );

    let load = catalog::load_assets(&args.csv)?;
    let assets = load.assets;
    tracing::debug!(?assets, "assets loaded");
    settings.limits().check(assets.len(), capital)?;

    let selected = engine::select(&assets, capital);
    tracing::info!(capital, selected_len = selected.len(), "knapsack selection done");
    tracing::debug!(?selected, "after knapsack");

    let filtered = engine::filter_by_risk(&selected, args.risk);
    tracing::info!(
        tolerance = args.risk,
        kept = filtered.len(),
        dropped = selected.len() - filtered.len(),
        "risk filter applied"
    );

    let report = SelectionReport::assemble(filtered, capital, args.risk, chrono::Utc::now());
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text(&settings.currency_symbol)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
    }

    if args.plot {
        let path = args
            .frontier_out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.frontier_path));
        let points = engine::sweep(&assets, capital);
        write_frontier(&path, &points)?;
        eprintln!("Frontier saved to {}", path.display());
    }

    Ok(())
}

fn write_frontier(path: &std::path::Path, points: &[FrontierPoint]) -> anyhow::Result<()> {
    let renderer = renderer_for_path(path);
    renderer.render(points)?;
    tracing::info!(
        path = %path.display(),
        renderer = renderer.renderer_name(),
        points = points.len(),
        "frontier written"
    );
    Ok(())
}

fn init_sentry(settings: &knapfolio_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
