use crate::domain::asset::Asset;
use serde::Deserialize;
use std::fmt;

pub const TICKER_COLUMN: &str = "Ticker";
pub const EXPECTED_RETURN_COLUMN: &str = "ExpectedReturn(%)";
pub const RISK_SCORE_COLUMN: &str = "RiskScore(0-100)";
pub const PRICE_COLUMN: &str = "Price";

/// One catalog row as it appears in the file, before any numeric parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetRow {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "ExpectedReturn(%)")]
    pub expected_return_pct: String,
    #[serde(rename = "RiskScore(0-100)")]
    pub risk_score: String,
    #[serde(rename = "Price")]
    pub price: String,
}

/// Assets accepted from a catalog, plus how many rows were dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub assets: Vec<Asset>,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based data row (the header is not counted).
    pub row: usize,
    pub reason: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog row {}: {}", self.row, self.reason)
    }
}

impl std::error::Error for RowError {}
