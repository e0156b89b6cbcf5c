use crate::domain::asset::Asset;

/// Keeps the assets whose risk score is at or below `tolerance`, in their original order.
///
/// This narrows an existing selection; it never re-runs the optimizer, so the survivors are not
/// necessarily the best portfolio available under that risk ceiling.
pub fn filter_by_risk(selection: &[Asset], tolerance: i64) -> Vec<Asset> {
    selection
        .iter()
        .filter(|a| a.risk_score <= tolerance)
        .cloned()
        .collect()
}
