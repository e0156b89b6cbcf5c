use crate::domain::asset::{return_percent, total_cost, Asset};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub tolerance: i64,
    pub capital: u64,
    pub tickers: Vec<String>,
    pub assets: Vec<Asset>,
    pub total_cost: u64,
    pub total_return_percent: f64,

    /// Mean risk score of the reported assets; `0.0` when nothing survived the filter.
    pub average_risk: f64,
    pub generated_at: DateTime<Utc>,
}

impl SelectionReport {
    /// Summarizes a filtered selection. `selection` should already be narrowed to `tolerance`.
    pub fn assemble(
        selection: Vec<Asset>,
        capital: u64,
        tolerance: i64,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let average_risk = if selection.is_empty() {
            0.0
        } else {
            selection.iter().map(|a| a.risk_score as f64).sum::<f64>() / selection.len() as f64
        };

        Self {
            tolerance,
            capital,
            tickers: selection.iter().map(|a| a.ticker.clone()).collect(),
            total_cost: total_cost(&selection),
            total_return_percent: return_percent(&selection, capital),
            average_risk,
            assets: selection,
            generated_at,
        }
    }

    pub fn render_text(&self, currency_symbol: &str) -> String {
        format!(
            "Selected {} assets:\n{}\nTotal Cost : {}{}\nExp Return : {:.1} %\nRisk Score : {}\n",
            self.assets.len(),
            self.tickers.join(" "),
            currency_symbol,
            group_thousands(self.total_cost),
            self.total_return_percent,
            self.average_risk_text(),
        )
    }

    /// An empty selection prints a bare `0`; otherwise the shortest float form (`35.0`, `17.5`).
    fn average_risk_text(&self) -> String {
        if self.assets.is_empty() {
            "0".to_string()
        } else {
            format!("{:?}", self.average_risk)
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap()
    }

    #[test]
    fn aggregates_cost_return_and_average_risk() {
        let selection = vec![Asset::new("A", 0.10, 10, 100), Asset::new("B", 0.20, 25, 200)];
        let report = SelectionReport::assemble(selection, 400, 30, at());

        assert_eq!(report.tickers, vec!["A", "B"]);
        assert_eq!(report.total_cost, 300);
        assert!((report.total_return_percent - 12.5).abs() < 1e-9);
        assert_eq!(report.average_risk, 17.5);
    }

    #[test]
    fn empty_selection_reports_zero_risk() {
        let report = SelectionReport::assemble(Vec::new(), 1_000, 0, at());
        assert_eq!(report.average_risk, 0.0);
        assert_eq!(report.total_cost, 0);
        assert_eq!(report.total_return_percent, 0.0);
    }

    #[test]
    fn zero_capital_reports_zero_return() {
        let report = SelectionReport::assemble(vec![Asset::new("A", 0.5, 1, 0)], 0, 100, at());
        assert_eq!(report.total_return_percent, 0.0);
    }

    #[test]
    fn renders_text_like_the_terminal_summary() {
        let selection = vec![
            Asset::new("INFY", 0.12, 30, 1_500_000),
            Asset::new("TCS", 0.10, 40, 234_567),
        ];
        let report = SelectionReport::assemble(selection, 2_000_000, 50, at());
        let text = report.render_text("₹");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Selected 2 assets:");
        assert_eq!(lines[1], "INFY TCS");
        assert_eq!(lines[2], "Total Cost : ₹1,734,567");
        assert_eq!(lines[3], "Exp Return : 10.2 %");
        assert_eq!(lines[4], "Risk Score : 35.0");
    }

    #[test]
    fn renders_fractional_and_empty_risk() {
        let selection = vec![Asset::new("A", 0.1, 10, 100), Asset::new("B", 0.1, 25, 100)];
        let text = SelectionReport::assemble(selection, 200, 30, at()).render_text("$");
        assert!(text.contains("Risk Score : 17.5\n"));

        let empty = SelectionReport::assemble(Vec::new(), 200, 0, at()).render_text("$");
        assert_eq!(
            empty,
            "Selected 0 assets:\n\nTotal Cost : $0\nExp Return : 0.0 %\nRisk Score : 0\n"
        );
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn serializes_to_json() {
        let report = SelectionReport::assemble(vec![Asset::new("A", 0.1, 10, 100)], 200, 15, at());
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["tickers"], serde_json::json!(["A"]));
        assert_eq!(v["total_cost"], 100);
        assert_eq!(v["assets"][0]["risk_score"], 10);
    }
}
