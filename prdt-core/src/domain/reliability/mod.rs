// prdt-core/src/domain/reliability/mod.rs

//! Internal-consistency reliability for multi-item scales.
//!
//! Every estimator works on the same complete-case item matrix: item columns
//! are coerced to numbers and any row with a missing item is dropped. When a
//! precondition fails (fewer than two items or rows, zero variance, a
//! degenerate covariance structure) the metric is reported as absent rather
//! than raised as an error.

pub mod alpha;
pub mod diagnostics;
pub mod omega;

pub use alpha::cronbach_alpha;
pub use diagnostics::{alpha_if_item_dropped, item_total_correlations};
pub use omega::mcdonald_omega;

use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::ordered::OrderedMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete-case item data: `rows[r][j]` is item `j` in row `r`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMatrix {
    items: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ItemMatrix {
    /// Coerces the item columns and keeps rows where every item is present.
    /// Fails when an item is not a column of the dataset.
    pub fn complete_cases(
        dataset: &Dataset,
        target: &str,
        items: &[String],
    ) -> Result<Self, DomainError> {
        let missing = dataset.missing_columns(items);
        if !missing.is_empty() {
            return Err(DomainError::UnknownItems {
                target: target.to_string(),
                missing: missing.join(", "),
            });
        }

        let columns: Vec<Vec<Option<f64>>> = items
            .iter()
            .map(|item| dataset.numeric(item).unwrap_or_default())
            .collect();

        let rows = (0..dataset.row_count())
            .filter_map(|r| columns.iter().map(|col| col[r]).collect::<Option<Vec<f64>>>())
            .collect();

        Ok(Self {
            items: items.to_vec(),
            rows,
        })
    }

    pub fn from_rows(items: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { items, rows }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[j]).collect()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.iter().sum()).collect()
    }

    /// Same rows, without item `j`.
    pub fn without_item(&self, j: usize) -> Self {
        let keep = |row: &Vec<f64>| -> Vec<f64> {
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != j)
                .map(|(_, v)| *v)
                .collect()
        };
        Self {
            items: keep_names(&self.items, j),
            rows: self.rows.iter().map(keep).collect(),
        }
    }

    /// Two items and two complete rows: the floor for every estimator.
    pub fn is_estimable(&self) -> bool {
        self.item_count() >= 2 && self.row_count() >= 2
    }
}

fn keep_names(items: &[String], j: usize) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != j)
        .map(|(_, n)| n.clone())
        .collect()
}

/// Per-item values in the scale's item order.
pub type ItemMetric = OrderedMap<Option<f64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetrics {
    pub items: Vec<String>,
    pub cronbach_alpha: Option<f64>,
    pub mcdonald_omega: Option<f64>,
    pub item_total_correlations: Option<ItemMetric>,
    pub alpha_if_item_dropped: Option<ItemMetric>,
}

impl ReliabilityMetrics {
    pub fn absent(items: Vec<String>) -> Self {
        Self {
            items,
            cronbach_alpha: None,
            mcdonald_omega: None,
            item_total_correlations: None,
            alpha_if_item_dropped: None,
        }
    }
}

pub struct ReliabilityAnalyzer;

impl ReliabilityAnalyzer {
    /// Alpha, omega and item diagnostics for `items`, all computed on one
    /// complete-case row set.
    pub fn analyze(
        dataset: &Dataset,
        target: &str,
        items: &[String],
    ) -> Result<ReliabilityMetrics, DomainError> {
        let items: Vec<String> = items
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        let matrix = ItemMatrix::complete_cases(dataset, target, &items)?;
        if !matrix.is_estimable() {
            debug!(
                target,
                items = matrix.item_count(),
                rows = matrix.row_count(),
                "Not enough items or complete rows for reliability"
            );
            return Ok(ReliabilityMetrics::absent(items));
        }

        Ok(ReliabilityMetrics {
            cronbach_alpha: cronbach_alpha(&matrix),
            mcdonald_omega: mcdonald_omega(&matrix),
            item_total_correlations: item_total_correlations(&matrix),
            alpha_if_item_dropped: alpha_if_item_dropped(&matrix),
            items,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;
    use anyhow::Result;

    fn scenario_dataset() -> Result<Dataset> {
        Ok(Dataset::from_columns(vec![
            Column::numeric("i1", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("i2", &[Some(2.0), Some(2.0), Some(3.0), Some(5.0)]),
        ])?)
    }

    #[test]
    fn test_complete_cases_drop_incomplete_rows() -> Result<()> {
        let ds = Dataset::from_columns(vec![
            Column::numeric("a", &[Some(1.0), None, Some(3.0)]),
            Column::text("b", &[Some("2"), Some("4"), Some("x")]),
        ])?;
        let m = ItemMatrix::complete_cases(&ds, "t", &["a".into(), "b".into()])?;
        assert_eq!(m.rows(), &[vec![1.0, 2.0]]);
        assert!(!m.is_estimable());
        Ok(())
    }

    #[test]
    fn test_unknown_items_fail() -> Result<()> {
        let res = ReliabilityAnalyzer::analyze(&scenario_dataset()?, "overall", &["i1".into(), "ghost".into()]);
        assert!(matches!(res, Err(DomainError::UnknownItems { missing, .. }) if missing == "ghost"));
        Ok(())
    }

    #[test]
    fn test_two_item_scenario() -> Result<()> {
        let ds = scenario_dataset()?;
        let items = vec!["i1".to_string(), "i2".to_string()];
        let metrics = ReliabilityAnalyzer::analyze(&ds, "overall", &items)?;

        let alpha = metrics.cronbach_alpha.unwrap();
        assert!((alpha - 20.0 / 21.0).abs() < 1e-9);
        assert!(alpha <= 1.0);

        // two items: no alpha-if-dropped
        assert!(metrics.alpha_if_item_dropped.is_none());
        let itc = metrics.item_total_correlations.unwrap();
        assert!((itc["i1"].unwrap() - 0.912_870_929).abs() < 1e-6);

        // repeated runs agree exactly
        let again = ReliabilityAnalyzer::analyze(&ds, "overall", &items)?;
        assert_eq!(again.mcdonald_omega, metrics.mcdonald_omega);
        Ok(())
    }

    #[test]
    fn test_single_item_reports_absent_metrics() -> Result<()> {
        let metrics = ReliabilityAnalyzer::analyze(&scenario_dataset()?, "s", &["i1".into()])?;
        assert_eq!(metrics, ReliabilityMetrics::absent(vec!["i1".into()]));
        Ok(())
    }

    #[test]
    fn test_blank_item_names_are_ignored() -> Result<()> {
        let metrics =
            ReliabilityAnalyzer::analyze(&scenario_dataset()?, "s", &["i1".into(), " ".into(), "i2".into()])?;
        assert_eq!(metrics.items, vec!["i1", "i2"]);
        assert!(metrics.cronbach_alpha.is_some());
        Ok(())
    }
}
