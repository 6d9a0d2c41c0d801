// prdt-core/src/domain/reliability/diagnostics.rs

use super::{ItemMatrix, ItemMetric, cronbach_alpha};
use crate::domain::stats::pearson;

/// Corrected item-total correlation: each item against the sum of the others.
pub fn item_total_correlations(matrix: &ItemMatrix) -> Option<ItemMetric> {
    if !matrix.is_estimable() {
        return None;
    }

    let totals = matrix.row_sums();
    let metric = matrix
        .items()
        .iter()
        .enumerate()
        .map(|(j, item)| {
            let values = matrix.column(j);
            let rest: Vec<f64> = totals.iter().zip(&values).map(|(t, v)| t - v).collect();
            (item.clone(), pearson(&values, &rest))
        })
        .collect();
    Some(metric)
}

/// Alpha recomputed with each item removed. Needs at least three items so the
/// remainder is still a scale.
pub fn alpha_if_item_dropped(matrix: &ItemMatrix) -> Option<ItemMetric> {
    if matrix.item_count() < 3 || matrix.row_count() < 2 {
        return None;
    }

    let metric = matrix
        .items()
        .iter()
        .enumerate()
        .map(|(j, item)| (item.clone(), cronbach_alpha(&matrix.without_item(j))))
        .collect();
    Some(metric)
}
