// prdt-core/src/domain/scales/definition.rs

use crate::domain::error::DomainError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    #[default]
    Sum,
    Mean,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interpretive bands, label -> range expression (`"0-4"`, `"15+"`, `"7"`).
/// Declaration order is significant: the first matching band wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cutoffs(Vec<(String, String)>);

impl Cutoffs {
    pub fn new<L: Into<String>, R: Into<String>>(bands: impl IntoIterator<Item = (L, R)>) -> Self {
        Self(
            bands
                .into_iter()
                .map(|(label, range)| (label.into(), range.into()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Cutoffs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, range) in &self.0 {
            map.serialize_entry(label, range)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Cutoffs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CutoffsVisitor;

        impl<'de> Visitor<'de> for CutoffsVisitor {
            type Value = Cutoffs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of band label to range (e.g. mild: \"5-9\")")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Cutoffs, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut bands = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, range)) = access.next_entry::<String, RangeLiteral>()? {
                    bands.push((label, range.0));
                }
                Ok(Cutoffs(bands))
            }
        }

        deserializer.deserialize_map(CutoffsVisitor)
    }
}

/// YAML writes `severe: 20` as a number; accept it as the range "20".
struct RangeLiteral(String);

impl<'de> Deserialize<'de> for RangeLiteral {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RangeLiteral(s),
            Raw::Number(n) => RangeLiteral(n.to_string()),
        })
    }
}

/// A composite scale built from item columns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct ScaleDefinition {
    #[validate(length(min = 1, message = "Scale name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "A scale needs at least one item"))]
    pub items: Vec<String>,

    #[serde(default)]
    pub method: ScoringMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_item: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_item: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoffs: Option<Cutoffs>,
}

impl ScaleDefinition {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if items.is_empty() {
            return Err(DomainError::EmptyScale(name));
        }
        Ok(Self {
            name,
            items,
            method: ScoringMethod::Sum,
            output: None,
            reverse: None,
            min_item: None,
            max_item: None,
            cutoffs: None,
        })
    }

    pub fn with_method(mut self, method: ScoringMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_reverse(mut self, items: Vec<String>, min_item: f64, max_item: f64) -> Self {
        self.reverse = Some(items);
        self.min_item = Some(min_item);
        self.max_item = Some(max_item);
        self
    }

    pub fn with_bounds(mut self, min_item: f64, max_item: f64) -> Self {
        self.min_item = Some(min_item);
        self.max_item = Some(max_item);
        self
    }

    pub fn with_cutoffs(mut self, cutoffs: Cutoffs) -> Self {
        self.cutoffs = Some(cutoffs);
        self
    }

    pub fn output_column(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("{}_score", self.name))
    }

    /// Both bounds, when reverse-coding is possible.
    pub fn item_bounds(&self) -> Option<(f64, f64)> {
        self.min_item.zip(self.max_item)
    }

    pub fn is_reversed(&self, item: &str) -> bool {
        self.reverse
            .as_ref()
            .is_some_and(|r| r.iter().any(|i| i == item))
    }
}

/// `min + max - value`. Applying it twice with the same bounds is the identity.
pub fn reverse_code(value: f64, min_item: f64, max_item: f64) -> f64 {
    min_item + max_item - value
}
