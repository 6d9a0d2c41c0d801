// prdt-core/src/domain/reliability/omega.rs

use super::ItemMatrix;
use crate::domain::stats::sample_covariance;
use nalgebra::{DMatrix, SymmetricEigen};

/// McDonald's omega from a one-factor approximation.
///
/// Loadings come from the leading eigenpair of the item covariance matrix
/// (`l = v * sqrt(lambda)`), specific variances are `max(diag - l^2, 0)`, and
/// `omega = (sum l)^2 / ((sum l)^2 + sum psi)`.
///
/// `None` when the covariance has non-finite entries, the leading eigenvalue
/// is not positive, or the denominator vanishes.
pub fn mcdonald_omega(matrix: &ItemMatrix) -> Option<f64> {
    if !matrix.is_estimable() {
        return None;
    }

    let cov = covariance_matrix(matrix)?;
    if cov.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let eigen = SymmetricEigen::new(cov.clone());
    let (lead, lambda) = eigen
        .eigenvalues
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if lambda <= 0.0 {
        return None;
    }

    let loadings = eigen.eigenvectors.column(lead) * lambda.sqrt();
    let specific: f64 = loadings
        .iter()
        .enumerate()
        .map(|(j, l)| (cov[(j, j)] - l * l).max(0.0))
        .sum();

    let common = loadings.sum().powi(2);
    let denominator = common + specific;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(common / denominator)
}

fn covariance_matrix(matrix: &ItemMatrix) -> Option<DMatrix<f64>> {
    let k = matrix.item_count();
    let columns: Vec<Vec<f64>> = (0..k).map(|j| matrix.column(j)).collect();

    let mut cov = DMatrix::zeros(k, k);
    for a in 0..k {
        for b in a..k {
            let c = sample_covariance(&columns[a], &columns[b])?;
            cov[(a, b)] = c;
            cov[(b, a)] = c;
        }
    }
    Some(cov)
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
    fn test_omega_in_unit_interval() {
        let m = matrix(vec![
            vec![1.0, 2.0, 1.0],
            vec![2.0, 2.0, 3.0],
            vec![3.0, 3.0, 2.0],
            vec![4.0, 5.0, 4.0],
            vec![2.0, 1.0, 2.0],
        ]);
        let omega = mcdonald_omega(&m).unwrap();
        assert!(omega > 0.0 && omega <= 1.0, "omega = {omega}");
    }

    #[test]
    fn test_perfectly_parallel_items_give_one() {
        let m = matrix(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]]);
        assert!((mcdonald_omega(&m).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_items_are_absent() {
        let m = matrix(vec![vec![4.0, 4.0], vec![4.0, 4.0], vec![4.0, 4.0]]);
        assert_eq!(mcdonald_omega(&m), None);
    }

    #[test]
    fn test_overflowing_covariance_is_absent() {
        let m = matrix(vec![vec![1e200, -1e200], vec![-1e200, 1e200], vec![1e200, 1e200]]);
        assert!(covariance_matrix(&m).unwrap().iter().any(|v| !v.is_finite()));
        assert_eq!(mcdonald_omega(&m), None);
    }

    #[test]
    fn test_deterministic() {
        let m = matrix(vec![vec![1.0, 2.0], vec![2.0, 2.0], vec![3.0, 3.0], vec![4.0, 5.0]]);
        assert_eq!(mcdonald_omega(&m), mcdonald_omega(&m));
    }
}
