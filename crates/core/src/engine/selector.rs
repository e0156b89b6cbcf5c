use crate::domain::asset::Asset;

/// Capital-constrained 0/1 knapsack over `assets`, maximizing total expected value
/// (`expected_return * price`) with total price at most `capital`.
///
/// The result keeps catalog order. When including an asset only ties the best value without it,
/// the asset is left out, so equal-value alternatives resolve toward the lower index.
///
/// Runs in `O(n * capital)` time. The value row is rolled in place (weights iterated downward),
/// and reconstruction reads an `n * (capital + 1)` table of include flags.
pub fn select(assets: &[Asset], capital: u64) -> Vec<Asset> {
    if assets.is_empty() || capital == 0 {
        return Vec::new();
    }

    let capacity = capital as usize;
    let width = capacity + 1;

    let mut best = vec![0.0_f64; width];
    let mut take = vec![false; assets.len() * width];

    for (i, asset) in assets.iter().enumerate() {
        let price = asset.price;
        if price > capital {
            continue;
        }
        let price = price as usize;
        let value = asset.expected_value();
        let row = &mut take[i * width..(i + 1) * width];

        for w in (price..=capacity).rev() {
            let include = value + best[w - price];
            // Strictly greater: a tie keeps the previous row's value, which is what marks the
            // asset as excluded during reconstruction.
            if include > best[w] {
                best[w] = include;
                row[w] = true;
            }
        }
    }

    let mut w = capacity;
    let mut selected = Vec::new();
    for i in (0..assets.len()).rev() {
        if take[i * width + w] {
            selected.push(assets[i].clone());
            w -= assets[i].price as usize;
        }
    }
    selected.reverse();

    tracing::trace!(
        assets_len = assets.len(),
        capital,
        selected_len = selected.len(),
        best_value = best[capacity],
        "knapsack selection"
    );

    selected
}
