use crate::domain::asset::Asset;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Body of a single-selection request: pick under `capital`, then narrow to `tolerance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub assets: Vec<Asset>,
    pub capital: u64,
    pub tolerance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontierRequest {
    pub assets: Vec<Asset>,
    pub capital: u64,
}

/// Ceilings applied before the knapsack runs. The selector allocates one include flag per asset
/// per unit of capital, so both the capital and the table size are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    pub max_capital: u64,
    pub max_table_cells: u64,
}

impl EngineLimits {
    pub fn check(&self, assets_len: usize, capital: u64) -> anyhow::Result<()> {
        validate_capital(capital, self.max_capital)?;
        validate_table_cells(assets_len, capital, self.max_table_cells)
    }
}

impl SelectionRequest {
    pub fn validate(&self, limits: &EngineLimits) -> anyhow::Result<()> {
        limits.check(self.assets.len(), self.capital)?;
        validate_assets(&self.assets)
    }
}

impl FrontierRequest {
    pub fn validate(&self, limits: &EngineLimits) -> anyhow::Result<()> {
        limits.check(self.assets.len(), self.capital)?;
        validate_assets(&self.assets)
    }
}

pub fn validate_capital(capital: u64, max_capital: u64) -> anyhow::Result<()> {
    ensure!(
        capital <= max_capital,
        "capital must be at most {max_capital} (got {capital})"
    );
    Ok(())
}

/// Number of include flags the selector allocates: `assets_len * (capital + 1)`, saturating.
pub fn table_cells(assets_len: usize, capital: u64) -> u64 {
    (assets_len as u64).saturating_mul(capital.saturating_add(1))
}

pub fn validate_table_cells(
    assets_len: usize,
    capital: u64,
    max_table_cells: u64,
) -> anyhow::Result<()> {
    let cells = table_cells(assets_len, capital);
    ensure!(
        cells <= max_table_cells,
        "{assets_len} assets at capital {capital} need {cells} table cells; the limit is {max_table_cells}"
    );
    Ok(())
}

pub fn validate_assets(assets: &[Asset]) -> anyhow::Result<()> {
    for (idx, asset) in assets.iter().enumerate() {
        ensure!(
            !asset.ticker.trim().is_empty(),
            "asset {idx}: ticker must be non-empty"
        );
        ensure!(
            asset.expected_return.is_finite(),
            "asset {idx} ({}): expected_return must be finite",
            asset.ticker
        );
    }
    Ok(())
}
