// prdt-core/src/domain/project/configuration.rs

use crate::domain::compliance::AlertRuleSet;
use crate::domain::governance::PhiOptions;
use crate::domain::ordered::OrderedMap;
use crate::domain::scales::ScaleDefinition;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The project file (`prdt.yaml`). Every field is optional.
#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Columns to describe and correlate. Empty means the scored scale columns.
    #[serde(default)]
    pub score_cols: Vec<String>,

    /// Scales to score, by registry name.
    #[serde(default)]
    pub scales: Vec<String>,

    #[validate(nested)]
    #[serde(default)]
    pub custom_scales: Vec<ScaleDefinition>,

    /// Ad-hoc item groups analysed for reliability only, in file order.
    #[serde(default)]
    pub reliability_groups: OrderedMap<Vec<String>>,

    #[serde(default = "default_drop_duplicates")]
    pub drop_duplicates: bool,

    #[validate(nested)]
    #[serde(default)]
    pub alerts: AlertRuleSet,

    #[serde(default)]
    pub phi: PhiOptions,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            score_cols: Vec::new(),
            scales: Vec::new(),
            custom_scales: Vec::new(),
            reliability_groups: OrderedMap::new(),
            drop_duplicates: default_drop_duplicates(),
            alerts: AlertRuleSet::default(),
            phi: PhiOptions::default(),
        }
    }
}

fn default_name() -> String {
    "prdt".to_string()
}
fn default_drop_duplicates() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::scales::ScoringMethod;
    use anyhow::Result;

    #[test]
    fn test_full_yaml() -> Result<()> {
        let yaml = r#"
name: clinic_intake
score_cols: [phq9_score]
scales: [phq9, wellbeing]
custom_scales:
  - name: wellbeing
    items: [wb1, wb2, wb3]
    method: mean
    reverse: [wb2]
    min_item: 1
    max_item: 5
    cutoffs:
      low: "1-2.49"
      high: "2.5+"
reliability_groups:
  sleep: [s1, s2]
alerts:
  missing_pct: 20
  cronbach_alpha_min: 0.7
phi:
  keywords: [dob]
  allow_export: true
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;

        assert_eq!(config.name, "clinic_intake");
        assert_eq!(config.custom_scales[0].method, ScoringMethod::Mean);
        assert_eq!(config.custom_scales[0].cutoffs.as_ref().unwrap().len(), 2);
        assert_eq!(config.reliability_groups["sleep"], vec!["s1", "s2"]);
        assert_eq!(config.alerts.missing_pct, Some(20.0));
        assert!(config.phi.enabled);
        assert!(config.phi.allow_export);
        assert!(config.drop_duplicates);
        Ok(())
    }

    #[test]
    fn test_empty_file_uses_defaults() -> Result<()> {
        let config: ProjectConfig = serde_yaml::from_str("{}")?;
        assert_eq!(config, ProjectConfig::default());
        Ok(())
    }

    #[test]
    fn test_custom_scale_without_items_is_rejected() -> Result<()> {
        let config: ProjectConfig =
            serde_yaml::from_str("custom_scales:\n  - name: broken\n    items: []\n")?;
        assert!(config.validate().is_err());
        Ok(())
    }
}
