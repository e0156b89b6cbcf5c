use crate::catalog::types::{
    CatalogLoad, RawAssetRow, RowError, EXPECTED_RETURN_COLUMN, PRICE_COLUMN, RISK_SCORE_COLUMN,
    TICKER_COLUMN,
};
use crate::domain::asset::Asset;
use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

pub fn load_assets<P: AsRef<Path>>(path: P) -> Result<CatalogLoad> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read asset catalog: {}", path.display()))?;

    let load = parse_assets(&bytes)
        .with_context(|| format!("failed to parse asset catalog: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        assets = load.assets.len(),
        skipped = load.skipped,
        "asset catalog loaded"
    );
    Ok(load)
}

/// Parses a CSV catalog. Only an unreadable header is fatal; every malformed data row is
/// logged and skipped.
pub fn parse_assets(bytes: &[u8]) -> Result<CatalogLoad> {
    // Spreadsheet exports often lead with a UTF-8 BOM, which would otherwise stick to the first
    // header name. The rest stays raw bytes so invalid UTF-8 fails its own row instead of being
    // replaced with U+FFFD.
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => {
            anyhow::ensure!(
                encoding == UTF_8,
                "unsupported catalog encoding {} (expected UTF-8)",
                encoding.name()
            );
            &bytes[bom_len..]
        }
        None => bytes,
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);

    let headers = reader
        .headers()
        .context("failed to read catalog header row")?
        .clone();
    tracing::info!(headers = ?headers.iter().collect::<Vec<_>>(), "catalog headers detected");

    for column in [TICKER_COLUMN, EXPECTED_RETURN_COLUMN, RISK_SCORE_COLUMN, PRICE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            tracing::warn!(column, "catalog is missing a required column; every row will be skipped");
        }
    }

    let mut out = CatalogLoad::default();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let parsed = record
            .map_err(|e| RowError {
                row,
                reason: e.to_string(),
            })
            .and_then(|record| {
                record
                    .deserialize::<RawAssetRow>(Some(&headers))
                    .map_err(|e| RowError {
                        row,
                        reason: e.to_string(),
                    })
            })
            .and_then(|raw| validate_row(row, raw));

        match parsed {
            Ok(asset) => out.assets.push(asset),
            Err(err) => {
                out.skipped += 1;
                tracing::warn!(error = %err, "skipping catalog row");
            }
        }
    }

    Ok(out)
}

fn validate_row(row: usize, raw: RawAssetRow) -> Result<Asset, RowError> {
    let fail = |reason: String| RowError { row, reason };

    let ticker = raw.ticker.trim().to_string();
    if ticker.is_empty() {
        return Err(fail("ticker must be non-empty".to_string()));
    }

    let pct = parse_finite(&raw.expected_return_pct)
        .ok_or_else(|| fail(format!("invalid {EXPECTED_RETURN_COLUMN}: {:?}", raw.expected_return_pct)))?;

    let risk_score = raw
        .risk_score
        .trim()
        .parse::<i64>()
        .map_err(|_| fail(format!("invalid {RISK_SCORE_COLUMN}: {:?}", raw.risk_score)))?;

    let price = parse_price(&raw.price)
        .ok_or_else(|| fail(format!("invalid {PRICE_COLUMN}: {:?}", raw.price)))?;

    Ok(Asset {
        ticker,
        expected_return: pct / 100.0,
        risk_score,
        price,
    })
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Truncates toward zero, so `99.9` costs `99` and `-0.5` costs `0`.
fn parse_price(s: &str) -> Option<u64> {
    let truncated = parse_finite(s)?.trunc();
    if truncated < 0.0 {
        return None;
    }
    Some(truncated as u64)
}
