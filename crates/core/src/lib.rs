pub mod catalog;
pub mod domain;
pub mod engine;
pub mod render;
pub mod report;

pub mod config {
    use crate::domain::contract::EngineLimits;
    use anyhow::Context;

    pub const DEFAULT_MAX_CAPITAL: u64 = 10_000_000;
    /// One byte per include flag, so roughly 200 MB of selector table.
    pub const DEFAULT_MAX_TABLE_CELLS: u64 = 200_000_000;
    pub const DEFAULT_FRONTIER_PATH: &str = "frontier.csv";
    pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub max_capital: u64,
        pub max_table_cells: u64,
        pub frontier_path: String,
        pub currency_symbol: String,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                sentry_dsn: None,
                max_capital: DEFAULT_MAX_CAPITAL,
                max_table_cells: DEFAULT_MAX_TABLE_CELLS,
                frontier_path: DEFAULT_FRONTIER_PATH.to_string(),
                currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let defaults = Self::default();

            let max_capital = parse_u64(&lookup, "KNAPFOLIO_MAX_CAPITAL")?
                .unwrap_or(defaults.max_capital);
            let max_table_cells = parse_u64(&lookup, "KNAPFOLIO_MAX_TABLE_CELLS")?
                .unwrap_or(defaults.max_table_cells);

            Ok(Self {
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
                max_capital,
                max_table_cells,
                frontier_path: lookup("KNAPFOLIO_FRONTIER_PATH")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.frontier_path),
                currency_symbol: lookup("KNAPFOLIO_CURRENCY_SYMBOL")
                    .unwrap_or(defaults.currency_symbol),
            })
        }

        pub fn limits(&self) -> EngineLimits {
            EngineLimits {
                max_capital: self.max_capital,
                max_table_cells: self.max_table_cells,
            }
        }

        pub fn require_capital_within(&self, capital: u64) -> anyhow::Result<u64> {
            crate::domain::contract::validate_capital(capital, self.max_capital)?;
            Ok(capital)
        }
    }

    fn parse_u64<F>(lookup: &F, key: &str) -> anyhow::Result<Option<u64>>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(key)
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{key} must be a non-negative integer (got {s:?})"))
            })
            .transpose()
    }

}
