// prdt-core/src/domain/scales/scorer.rs

use super::definition::{Cutoffs, ScaleDefinition, ScoringMethod, reverse_code};
use super::interpret::Interpreter;
use super::registry::ScaleRegistry;
use crate::domain::dataset::{Column, Dataset};
use crate::domain::error::DomainError;
use crate::domain::stats::{mean, sample_variance};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What downstream stages need to know about a scored scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleMetadata {
    pub name: String,
    pub output_column: String,
    pub method: ScoringMethod,
    pub cutoffs: Option<Cutoffs>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleScoreSummary {
    pub name: String,
    pub score_column: String,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub interpretation: Option<String>,
}

pub struct ScaleScorer<'r> {
    registry: &'r ScaleRegistry,
}

impl<'r> ScaleScorer<'r> {
    pub fn new(registry: &'r ScaleRegistry) -> Self {
        Self { registry }
    }

    /// Scores every requested scale and returns the dataset with one output
    /// column per scale. The input dataset is left untouched.
    pub fn score(
        &self,
        dataset: &Dataset,
        names: &[String],
    ) -> Result<(Dataset, Vec<ScaleMetadata>), DomainError> {
        let mut scored = dataset.clone();
        let mut metadata = Vec::with_capacity(names.len());

        for name in names {
            let definition = self.registry.get(name)?;
            let column = score_definition(dataset, definition)?;
            info!(scale = %definition.name, column = %column.name, "Scale scored");

            metadata.push(ScaleMetadata {
                name: definition.name.clone(),
                output_column: column.name.clone(),
                method: definition.method,
                cutoffs: definition.cutoffs.clone(),
                items: definition.items.clone(),
            });
            scored = scored.with_column(column)?;
        }

        Ok((scored, metadata))
    }
}

/// Row-wise aggregate of the (possibly reverse-coded) item columns.
pub fn score_definition(
    dataset: &Dataset,
    definition: &ScaleDefinition,
) -> Result<Column, DomainError> {
    let mut missing = dataset.missing_columns(&definition.items);
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(DomainError::UnknownItems {
            target: definition.name.clone(),
            missing: missing.join(", "),
        });
    }

    let bounds = definition.item_bounds();
    if definition.reverse.is_some() && bounds.is_none() {
        debug!(scale = %definition.name, "Reverse items declared without bounds, not reversing");
    }

    let mut item_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(definition.items.len());
    for item in &definition.items {
        let mut values = dataset.numeric(item).unwrap_or_default();
        if let Some((min_item, max_item)) = bounds
            && definition.is_reversed(item)
        {
            for v in values.iter_mut().flatten() {
                *v = reverse_code(*v, min_item, max_item);
            }
        }
        item_values.push(values);
    }

    let scores: Vec<Option<f64>> = (0..dataset.row_count())
        .map(|row| {
            let present = item_values.iter().filter_map(|col| col[row]);
            aggregate(present, definition.method)
        })
        .collect();

    Ok(Column::numeric(definition.output_column(), &scores))
}

fn aggregate(present: impl Iterator<Item = f64>, method: ScoringMethod) -> Option<f64> {
    let (sum, count) = present.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    match method {
        // a row with no answered item sums to zero
        ScoringMethod::Sum => Some(sum),
        ScoringMethod::Mean if count == 0 => None,
        ScoringMethod::Mean => Some(sum / count as f64),
    }
}

/// Mean / std / min / max of each scored column, with the mean banded through the scale's cutoffs.
pub fn summarize_scores(dataset: &Dataset, metadata: &[ScaleMetadata]) -> Vec<ScaleScoreSummary> {
    metadata
        .iter()
        .map(|meta| {
            let values: Vec<f64> = dataset
                .numeric(&meta.output_column)
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .collect();

            let mean = mean(&values);
            ScaleScoreSummary {
                name: meta.name.clone(),
                score_column: meta.output_column.clone(),
                mean,
                std: score_std(&values),
                min: values.iter().copied().reduce(f64::min),
                max: values.iter().copied().reduce(f64::max),
                interpretation: Interpreter::interpret(mean, meta.cutoffs.as_ref()),
            }
        })
        .collect()
}

/// Sample standard deviation; zero for a single observation.
fn score_std(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(0.0),
        _ => sample_variance(values).map(f64::sqrt),
    }
}
