use crate::domain::asset::{return_percent, Asset, FrontierPoint};
use crate::engine::filter::filter_by_risk;
use crate::engine::selector::select;

pub const TOLERANCE_STEP: i64 = 5;
pub const TOLERANCE_MAX: i64 = 100;

/// Tolerances visited by [`sweep`]: `0, 5, ..., 100`.
pub fn tolerance_grid() -> impl Iterator<Item = i64> {
    (0..=TOLERANCE_MAX).step_by(TOLERANCE_STEP as usize)
}

/// Traces the risk/return frontier: one point per grid tolerance, in ascending order.
///
/// The knapsack result does not depend on tolerance, so it is computed once and filtered at each
/// grid value. Risk is the sum of the surviving scores (not an average); return is the surviving
/// expected value as a percentage of `capital`.
pub fn sweep(assets: &[Asset], capital: u64) -> Vec<FrontierPoint> {
    let selection = select(assets, capital);

    tolerance_grid()
        .map(|tolerance| {
            let filtered = filter_by_risk(&selection, tolerance);
            FrontierPoint {
                tolerance,
                risk: filtered.iter().map(|a| a.risk_score).sum(),
                return_percent: return_percent(&filtered, capital),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Asset> {
        vec![
            Asset::new("LOW", 0.04, 10, 100),
            Asset::new("MID", 0.08, 45, 150),
            Asset::new("HIGH", 0.15, 90, 200),
            Asset::new("SKIP", 0.01, 5, 400),
        ]
    }

    #[test]
    fn grid_has_21_ascending_tolerances() {
        let grid: Vec<i64> = tolerance_grid().collect();
        assert_eq!(grid.len(), 21);
        assert_eq!(grid.first(), Some(&0));
        assert_eq!(grid.last(), Some(&100));
        assert!(grid.windows(2).all(|w| w[1] - w[0] == TOLERANCE_STEP));
    }

    #[test]
    fn point_i_sits_at_tolerance_five_i() {
        let points = sweep(&catalog(), 450);
        assert_eq!(points.len(), 21);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.tolerance, 5 * i as i64);
        }
    }

    #[test]
    fn risk_is_summed_and_return_is_relative_to_capital() {
        // Selection at 450 is LOW + MID + HIGH (value 4 + 12 + 30 = 46).
        let points = sweep(&catalog(), 450);

        assert_eq!(points[0].as_pair(), (0, 0.0));

        let at_10 = &points[2];
        assert_eq!(at_10.risk, 10);
        assert!((at_10.return_percent - 4.0 / 450.0 * 100.0).abs() < 1e-9);

        let at_45 = &points[9];
        assert_eq!(at_45.risk, 55);
        assert!((at_45.return_percent - 16.0 / 450.0 * 100.0).abs() < 1e-9);

        let at_100 = &points[20];
        assert_eq!(at_100.risk, 145);
        assert!((at_100.return_percent - 46.0 / 450.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capital_produces_flat_zero_frontier() {
        let points = sweep(&catalog(), 0);
        assert_eq!(points.len(), 21);
        assert!(points.iter().all(|p| p.risk == 0 && p.return_percent == 0.0));
    }

    #[test]
    fn sweep_is_restartable() {
        let assets = catalog();
        assert_eq!(sweep(&assets, 300), sweep(&assets, 300));
    }
}
