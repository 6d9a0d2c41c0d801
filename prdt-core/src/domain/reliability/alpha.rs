// prdt-core/src/domain/reliability/alpha.rs

#![allow(clippy::cast_precision_loss)]

use super::ItemMatrix;
use crate::domain::stats::{is_zero_variance, sample_variance};

/// Cronbach's alpha: `k/(k-1) * (1 - sum(item variances) / variance(total))`.
///
/// `None` below two items or two complete rows, when the total score has
/// zero variance, or when the variances overflow.
pub fn cronbach_alpha(matrix: &ItemMatrix) -> Option<f64> {
    if !matrix.is_estimable() {
        return None;
    }

    let k = matrix.item_count() as f64;
    let item_var_sum = (0..matrix.item_count())
        .map(|j| sample_variance(&matrix.column(j)))
        .sum::<Option<f64>>()?;

    let totals = matrix.row_sums();
    let total_var = sample_variance(&totals)?;
    if is_zero_variance(&totals) || !total_var.is_finite() || !item_var_sum.is_finite() {
        return None;
    }

    Some((k / (k - 1.0)) * (1.0 - item_var_sum / total_var))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> ItemMatrix {
        let k = rows.first().map(Vec::len).unwrap_or(0);
        ItemMatrix::from_rows((0..k).map(|j| format!("i{j}")).collect(), rows)
    }

    #[test]
    fn test_known_value() {
        let m = matrix(vec![
            vec![1.0, 2.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 5.0],
        ]);
        let alpha = cronbach_alpha(&m).unwrap();
        assert!((alpha - 0.952_381).abs() < 1e-6);
    }

    #[test]
    fn test_identical_items_give_one() {
        let m = matrix(vec![vec![1.0, 1.0, 1.0], vec![3.0, 3.0, 3.0], vec![2.0, 2.0, 2.0]]);
        assert!((cronbach_alpha(&m).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_items_are_absent() {
        let m = matrix(vec![vec![2.0, 2.0], vec![2.0, 2.0], vec![2.0, 2.0]]);
        assert_eq!(cronbach_alpha(&m), None);
    }

    #[test]
    fn test_large_offset_items_keep_alpha() {
        let m = matrix(vec![
            vec![1e6, 1e6],
            vec![1e6 + 1.0, 1e6 + 1.0],
            vec![1e6, 1e6],
            vec![1e6 + 1.0, 1e6 + 1.0],
        ]);
        assert!((cronbach_alpha(&m).unwrap() - 1.0).abs() < 1e-9);
        assert!((crate::domain::reliability::mcdonald_omega(&m).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_variance_is_absent() {
        let m = matrix(vec![vec![1e200, -1e200], vec![-1e200, 1e200], vec![1e200, 1e200]]);
        assert_eq!(cronbach_alpha(&m), None);
    }

    #[test]
    fn test_too_few_rows() {
        assert_eq!(cronbach_alpha(&matrix(vec![vec![1.0, 2.0]])), None);
    }

    #[test]
    fn test_anti_correlated_items_can_go_negative() {
        let m = matrix(vec![vec![1.0, 4.0], vec![2.0, 2.0], vec![3.0, 3.0], vec![4.0, 0.0]]);
        assert!(cronbach_alpha(&m).unwrap() < 0.0);
    }
}
