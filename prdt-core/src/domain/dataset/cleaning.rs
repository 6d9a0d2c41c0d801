// prdt-core/src/domain/dataset/cleaning.rs

use super::{Dataset, NA_MARKERS, Value};
use std::collections::HashSet;
use tracing::debug;

/// `" Item-1 Score"` -> `"item_1_score"`
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Normalizes column names, turns NA markers into missing cells and
/// optionally drops exact duplicate rows.
pub fn basic_clean(mut dataset: Dataset, drop_duplicates: bool) -> Dataset {
    for column in dataset.columns_mut().iter_mut() {
        column.name = normalize_column_name(&column.name);
        for value in column.values.iter_mut() {
            if let Value::Text(s) = value
                && NA_MARKERS.contains(&s.trim())
            {
                *value = Value::Missing;
            }
        }
    }

    if !drop_duplicates {
        return dataset;
    }

    let rows = dataset.rows_as_text();
    let mut seen = HashSet::with_capacity(rows.len());
    let keep: Vec<bool> = rows.into_iter().map(|row| seen.insert(row)).collect();
    let dropped = keep.iter().filter(|k| !**k).count();

    if dropped > 0 {
        debug!(dropped, "Dropping duplicate rows");
        for column in dataset.columns_mut().iter_mut() {
            let mut flags = keep.iter();
            column.values.retain(|_| flags.next().copied().unwrap_or(true));
        }
    }

    dataset
}
