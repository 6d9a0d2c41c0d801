// prdt-core/src/domain/stats.rs

// Statistical helpers work on counts converted to f64
#![allow(clippy::cast_precision_loss)]

use crate::domain::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). Undefined below two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(ss / (values.len() - 1) as f64)
}

/// Every value equals the first one. Decided on the values, not on the
/// computed variance, which can be a rounding residue for a constant series.
pub fn is_zero_variance(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Sample covariance of two equally long series.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(x)?, mean(y)?);
    let sp: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Some(sp / (x.len() - 1) as f64)
}

/// Pearson correlation, `None` when either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let vx = sample_variance(x)?;
    let vy = sample_variance(y)?;
    if is_zero_variance(x) || is_zero_variance(y) {
        return None;
    }
    let r = sample_covariance(x, y)? / (vx.sqrt() * vy.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// --- DESCRIPTIVES ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptive {
    pub variable: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Numeric summary per requested column. Absent columns are skipped.
pub fn describe_columns(dataset: &Dataset, columns: &[String]) -> Vec<Descriptive> {
    columns
        .iter()
        .filter_map(|name| {
            let mut values: Vec<f64> = dataset.numeric(name)?.into_iter().flatten().collect();
            values.sort_by(f64::total_cmp);
            Some(Descriptive {
                variable: name.clone(),
                count: values.len(),
                mean: mean(&values),
                std: sample_variance(&values).map(f64::sqrt),
                min: values.first().copied(),
                p25: quantile(&values, 0.25),
                p50: quantile(&values, 0.5),
                p75: quantile(&values, 0.75),
                max: values.last().copied(),
            })
        })
        .collect()
}

pub type CorrelationMatrix = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Pairwise-complete Pearson correlations between the requested columns.
pub fn pearson_corr(dataset: &Dataset, columns: &[String]) -> CorrelationMatrix {
    let numeric: Vec<(&String, Vec<Option<f64>>)> = columns
        .iter()
        .filter_map(|name| dataset.numeric(name).map(|v| (name, v)))
        .collect();

    let mut matrix = CorrelationMatrix::new();
    for (a, xs) in &numeric {
        let row = matrix.entry((*a).clone()).or_default();
        for (b, ys) in &numeric {
            let (x, y): (Vec<f64>, Vec<f64>) = xs
                .iter()
                .zip(ys)
                .filter_map(|(x, y)| x.zip(*y))
                .unzip();
            row.insert((*b).clone(), pearson(&x, &y));
        }
    }
    matrix
}

// --- MISSINGNESS ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingDetail {
    pub variable: String,
    pub missing: usize,
    pub missing_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingSummary {
    pub count: BTreeMap<String, usize>,
    pub percent: BTreeMap<String, f64>,
    pub detail: Vec<MissingDetail>,
}

/// Missing count and percentage (2 decimals) for every column.
pub fn missing_summary(dataset: &Dataset) -> MissingSummary {
    let total = dataset.row_count();
    let mut summary = MissingSummary::default();

    for column in dataset.columns() {
        let missing = column.missing_count();
        let pct = if total > 0 {
            round2(missing as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        summary.count.insert(column.name.clone(), missing);
        summary.percent.insert(column.name.clone(), pct);
        summary.detail.push(MissingDetail {
            variable: column.name.clone(),
            missing,
            missing_pct: pct,
        });
    }
    summary
}
