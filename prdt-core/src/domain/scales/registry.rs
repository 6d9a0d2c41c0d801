// prdt-core/src/domain/scales/registry.rs

use super::definition::{Cutoffs, ScaleDefinition, ScoringMethod};
use crate::domain::error::DomainError;
use std::collections::BTreeMap;
use tracing::info;

/// Scale definitions available to a run: the built-in instruments plus any
/// custom definitions supplied by the project configuration.
#[derive(Debug, Clone, Default)]
pub struct ScaleRegistry {
    definitions: BTreeMap<String, ScaleDefinition>,
}

impl ScaleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// PHQ-9 and GAD-7, items scored 0-3.
    pub fn builtin() -> Self {
        let mut definitions = BTreeMap::new();
        for def in [phq9(), gad7()] {
            definitions.insert(def.name.clone(), def);
        }
        Self { definitions }
    }

    /// Adds custom definitions. A custom definition replaces a built-in of the same name.
    pub fn with_custom(
        mut self,
        custom: impl IntoIterator<Item = ScaleDefinition>,
    ) -> Result<Self, DomainError> {
        for def in custom {
            if def.items.is_empty() {
                return Err(DomainError::EmptyScale(def.name));
            }
            if self.definitions.contains_key(&def.name) {
                info!(scale = %def.name, "Custom scale overrides a registered definition");
            }
            self.definitions.insert(def.name.clone(), def);
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&ScaleDefinition, DomainError> {
        self.definitions
            .get(name)
            .ok_or_else(|| DomainError::UnknownScale {
                name: name.to_string(),
                available: self.available().join(", "),
            })
    }

    /// Sorted scale names.
    pub fn available(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScaleDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn numbered_items(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}_item{i}")).collect()
}

fn phq9() -> ScaleDefinition {
    ScaleDefinition {
        name: "phq9".to_string(),
        items: numbered_items("phq9", 9),
        method: ScoringMethod::Sum,
        output: None,
        reverse: None,
        min_item: Some(0.0),
        max_item: Some(3.0),
        cutoffs: Some(Cutoffs::new([
            ("minimal", "0-4"),
            ("mild", "5-9"),
            ("moderate", "10-14"),
            ("moderately_severe", "15-19"),
            ("severe", "20-27"),
        ])),
    }
}

fn gad7() -> ScaleDefinition {
    ScaleDefinition {
        name: "gad7".to_string(),
        items: numbered_items("gad7", 7),
        method: ScoringMethod::Sum,
        output: None,
        reverse: None,
        min_item: Some(0.0),
        max_item: Some(3.0),
        cutoffs: Some(Cutoffs::new([
            ("minimal", "0-4"),
            ("mild", "5-9"),
            ("moderate", "10-14"),
            ("severe", "15-21"),
        ])),
    }
}
