use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub ticker: String,

    /// Fractional rate (a catalog percentage of `12.5` is stored as `0.125`).
    pub expected_return: f64,

    /// Conventionally 0..=100. Nothing downstream enforces the range.
    pub risk_score: i64,

    /// Monetary cost, also the knapsack weight.
    pub price: u64,
}

impl Asset {
    pub fn new(ticker: impl Into<String>, expected_return: f64, risk_score: i64, price: u64) -> Self {
        Self {
            ticker: ticker.into(),
            expected_return,
            risk_score,
            price,
        }
    }

    /// Expected monetary gain of holding this asset: rate times price.
    pub fn expected_value(&self) -> f64 {
        self.expected_return * self.price as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    pub tolerance: i64,
    pub risk: i64,
    pub return_percent: f64,
}

impl FrontierPoint {
    pub fn as_pair(&self) -> (i64, f64) {
        (self.risk, self.return_percent)
    }
}

pub fn total_cost(assets: &[Asset]) -> u64 {
    assets.iter().map(|a| a.price).sum()
}

pub fn total_expected_value(assets: &[Asset]) -> f64 {
    assets.iter().map(Asset::expected_value).sum()
}

/// Aggregate return as a percentage of `capital`. Zero capital yields `0.0`.
pub fn return_percent(assets: &[Asset], capital: u64) -> f64 {
    if capital == 0 {
        return 0.0;
    }
    total_expected_value(assets) / capital as f64 * 100.0
}
