// prdt-core/src/domain/dataset/mod.rs

pub mod cleaning;

pub use cleaning::{basic_clean, normalize_column_name};

use crate::domain::error::DomainError;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Cell markers read as missing when a table is loaded.
pub const NA_MARKERS: [&str; 3] = ["", "NA", "N/A"];

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric coercion: numbers pass through, text is parsed, anything else is missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text rendering used by the PHI scanner and the CSV writer.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Missing => None,
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }

    pub fn from_f64(value: Option<f64>) -> Self {
        match value {
            Some(n) if n.is_finite() => Value::Number(n),
            _ => Value::Missing,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn numeric(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self::new(name, values.iter().map(|v| Value::from_f64(*v)).collect())
    }

    pub fn text(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Some(s) => Value::Text((*s).to_string()),
                    None => Value::Missing,
                })
                .collect(),
        )
    }

    /// Builds a column from raw cells. The column is numeric when every
    /// non-missing cell parses as a number, text otherwise.
    pub fn infer(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        let cells: Vec<Option<String>> = cells
            .into_iter()
            .map(|c| c.filter(|s| !NA_MARKERS.contains(&s.trim())))
            .collect();

        let all_numeric = cells
            .iter()
            .flatten()
            .all(|s| s.trim().parse::<f64>().is_ok());

        let values = cells
            .into_iter()
            .map(|cell| match cell {
                None => Value::Missing,
                Some(s) if all_numeric => match s.trim().parse::<f64>() {
                    Ok(n) => Value::Number(n),
                    Err(_) => Value::Text(s),
                },
                Some(s) => Value::Text(s),
            })
            .collect();

        Self::new(name, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A column holding at least one text cell.
    pub fn is_text(&self) -> bool {
        self.values.iter().any(|v| matches!(v, Value::Text(_)))
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    pub fn to_f64(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// Non-missing cells rendered as text.
    pub fn present_text(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.values.iter().filter_map(Value::as_text)
    }
}

/// Ordered, named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DomainError> {
        let mut dataset = Self::new();
        for column in columns {
            dataset = dataset.with_column(column)?;
        }
        Ok(dataset)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Names from `names` that are not columns of this dataset, in input order.
    pub fn missing_columns<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .filter(|n| !self.contains(n))
            .map(String::as_str)
            .collect()
    }

    /// Numeric view of a column (non-parseable cells are `None`).
    pub fn numeric(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.column(name).map(Column::to_f64)
    }

    /// Returns a new dataset with `column` appended, or replacing a column of the same name.
    pub fn with_column(mut self, column: Column) -> Result<Self, DomainError> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(DomainError::DatasetShape(format!(
                "column '{}' has {} rows, dataset has {}",
                column.name,
                column.len(),
                self.row_count()
            )));
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// Copy of the named columns, in dataset order.
    pub fn select(&self, names: &[String]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .filter(|c| names.contains(&c.name))
                .cloned()
                .collect(),
        }
    }

    /// Copy without the named columns.
    pub fn without(&self, names: &[String]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .filter(|c| !names.contains(&c.name))
                .cloned()
                .collect(),
        }
    }

    /// Row-major rendering of the cells, used by writers.
    pub fn rows_as_text(&self) -> Vec<Vec<Option<String>>> {
        (0..self.row_count())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values[row].as_text().map(Cow::into_owned))
                    .collect()
            })
            .collect()
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_infer_numeric_and_text_columns() {
        let numeric = Column::infer(
            "score",
            vec![Some("1".into()), Some(" 2.5 ".into()), Some("NA".into()), None],
        );
        assert!(!numeric.is_text());
        assert_eq!(numeric.to_f64(), vec![Some(1.0), Some(2.5), None, None]);

        let mixed = Column::infer("contact", vec![Some("12".into()), Some("a@b.io".into())]);
        assert!(mixed.is_text());
        assert_eq!(mixed.values[0], Value::Text("12".into()));
    }

    #[test]
    fn test_text_cells_are_coerced_when_numeric_view_is_requested() {
        let col = Column::text("item", &[Some("3"), Some("x"), None]);
        assert_eq!(col.to_f64(), vec![Some(3.0), None, None]);
    }

    #[test]
    fn test_with_column_rejects_mismatched_length() -> Result<()> {
        let ds = Dataset::from_columns(vec![Column::numeric("a", &[Some(1.0), Some(2.0)])])?;
        let res = ds.with_column(Column::numeric("b", &[Some(1.0)]));
        assert!(matches!(res, Err(DomainError::DatasetShape(_))));
        Ok(())
    }

    #[test]
    fn test_with_column_replaces_existing() -> Result<()> {
        let ds = Dataset::from_columns(vec![Column::numeric("a", &[Some(1.0)])])?
            .with_column(Column::numeric("a", &[Some(9.0)]))?;
        assert_eq!(ds.column_count(), 1);
        assert_eq!(ds.numeric("a"), Some(vec![Some(9.0)]));
        Ok(())
    }

    #[test]
    fn test_select_and_without_keep_order() -> Result<()> {
        let ds = Dataset::from_columns(vec![
            Column::numeric("a", &[Some(1.0)]),
            Column::numeric("b", &[Some(2.0)]),
            Column::numeric("c", &[Some(3.0)]),
        ])?;
        let picked = ds.select(&["c".to_string(), "a".to_string()]);
        assert_eq!(picked.column_names(), vec!["a", "c"]);
        let rest = ds.without(&["b".to_string()]);
        assert_eq!(rest.column_names(), vec!["a", "c"]);
        assert_eq!(ds.missing_columns(&["a".into(), "z".into()]), vec!["z"]);
        Ok(())
    }
}
