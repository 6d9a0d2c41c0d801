// prdt-core/src/domain/governance/phi.rs

use serde::{Deserialize, Serialize};

/// A named regular expression that signals protected health information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhiPattern {
    pub name: String,
    pub regex: String,
}

impl PhiPattern {
    pub fn new(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
        }
    }
}

pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
pub const PHONE_PATTERN: &str = r"\b(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b";
pub const SSN_PATTERN: &str = r"\b\d{3}-\d{2}-\d{4}\b";
pub const MRN_PATTERN: &str = r"\bMRN\d+\b";
pub const URL_PATTERN: &str = r"https?://[^\s]+";

/// Column-name fragments that flag a column even when no value matched.
pub const DEFAULT_KEYWORDS: [&str; 4] = ["name", "email", "phone", "mrn"];

/// Pseudo-pattern reported when a column is flagged from its name alone.
pub const COLUMN_NAME_MATCH: &str = "column_name";

pub fn builtin_patterns() -> Vec<PhiPattern> {
    vec![
        PhiPattern::new("email", EMAIL_PATTERN),
        PhiPattern::new("phone", PHONE_PATTERN),
        PhiPattern::new("ssn", SSN_PATTERN),
        PhiPattern::new("mrn", MRN_PATTERN),
        PhiPattern::new("url", URL_PATTERN),
    ]
}

fn default_enabled() -> bool {
    true
}

/// PHI scanning options, as read from the `phi:` block of the project file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PhiOptions {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra regexes, reported as `custom_1`, `custom_2`, ...
    #[serde(default)]
    pub extra_patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Never scanned.
    #[serde(default)]
    pub ignore_columns: Vec<String>,
    /// Scanned and reported, but kept in the dataset.
    #[serde(default)]
    pub allow_columns: Vec<String>,
    #[serde(default)]
    pub allow_export: bool,
}

impl Default for PhiOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_patterns: Vec::new(),
            keywords: Vec::new(),
            ignore_columns: Vec::new(),
            allow_columns: Vec::new(),
            allow_export: false,
        }
    }
}

impl PhiOptions {
    /// Built-in patterns followed by the custom ones.
    pub fn patterns(&self) -> Vec<PhiPattern> {
        let mut patterns = builtin_patterns();
        patterns.extend(
            self.extra_patterns
                .iter()
                .enumerate()
                .map(|(idx, regex)| PhiPattern::new(format!("custom_{}", idx + 1), regex.as_str())),
        );
        patterns
    }

    /// Default keywords plus the configured ones, lower-cased.
    pub fn keyword_set(&self) -> Vec<String> {
        let mut keywords: Vec<String> = DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect();
        for keyword in &self.keywords {
            let keyword = keyword.to_lowercase();
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_custom_patterns_are_numbered_after_builtins() {
        let options = PhiOptions {
            extra_patterns: vec![r"ID-\d+".into(), r"\bPT\d{4}\b".into()],
            ..Default::default()
        };
        let names: Vec<String> = options.patterns().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["email", "phone", "ssn", "mrn", "url", "custom_1", "custom_2"]
        );
    }

    #[test]
    fn test_keywords_are_lowercased_and_merged() {
        let options = PhiOptions {
            keywords: vec!["DOB".into(), "Name".into()],
            ..Default::default()
        };
        assert_eq!(options.keyword_set(), vec!["name", "email", "phone", "mrn", "dob"]);
    }

    #[test]
    fn test_yaml_defaults() -> Result<()> {
        let options: PhiOptions = serde_yaml::from_str("allow_columns: [contact]")?;
        assert!(options.enabled);
        assert!(!options.allow_export);
        assert_eq!(options.allow_columns, vec!["contact"]);
        Ok(())
    }
}
