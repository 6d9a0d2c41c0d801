// prdt-core/src/domain/governance/scanner.rs

use crate::domain::dataset::{Column, Dataset};
use crate::domain::error::DomainError;
use crate::domain::governance::phi::{COLUMN_NAME_MATCH, PhiOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: String,
    /// Number of rows where the pattern matched.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhiFinding {
    pub column: String,
    pub matches: Vec<PatternMatch>,
}

impl PhiFinding {
    pub fn pattern_names(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.pattern.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhiScanOutcome {
    /// Input minus quarantined columns.
    pub dataset: Dataset,
    pub findings: Vec<PhiFinding>,
    /// The removed columns, `None` when nothing was removed.
    pub quarantine: Option<Dataset>,
}

impl PhiScanOutcome {
    pub fn quarantined_columns(&self) -> Vec<&str> {
        self.quarantine
            .as_ref()
            .map(Dataset::column_names)
            .unwrap_or_default()
    }
}

/// Regexes are compiled once, when the scanner is built.
struct CompiledPattern {
    name: String,
    regex: Regex,
}

pub struct PhiScanner {
    patterns: Vec<CompiledPattern>,
    keywords: Vec<String>,
    ignore_columns: Vec<String>,
    allow_columns: Vec<String>,
    enabled: bool,
}

impl PhiScanner {
    /// Compiles built-in and custom patterns. A malformed custom regex is a
    /// configuration error.
    pub fn new(options: &PhiOptions) -> Result<Self, DomainError> {
        let patterns = options
            .patterns()
            .into_iter()
            .map(|pattern| match Regex::new(&pattern.regex) {
                Ok(regex) => Ok(CompiledPattern {
                    name: pattern.name,
                    regex,
                }),
                Err(e) => Err(DomainError::InvalidPattern {
                    name: pattern.name,
                    reason: e.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            keywords: options.keyword_set(),
            ignore_columns: options.ignore_columns.clone(),
            allow_columns: options.allow_columns.clone(),
            enabled: options.enabled,
        })
    }

    /// Flags text columns carrying PHI and moves them out of the dataset,
    /// unless they are allow-listed.
    pub fn scan(&self, dataset: &Dataset) -> PhiScanOutcome {
        if !self.enabled {
            debug!("PHI scanning disabled");
            return PhiScanOutcome {
                dataset: dataset.clone(),
                findings: vec![],
                quarantine: None,
            };
        }

        let mut findings = Vec::new();
        let mut quarantined: Vec<String> = Vec::new();

        for column in dataset.columns() {
            if !column.is_text() || self.ignore_columns.contains(&column.name) {
                continue;
            }
            let Some(matches) = self.scan_column(column) else {
                continue;
            };

            if self.allow_columns.contains(&column.name) {
                debug!(column = %column.name, "PHI column allow-listed, keeping it");
            } else {
                warn!(column = %column.name, "PHI detected, quarantining column");
                quarantined.push(column.name.clone());
            }
            findings.push(PhiFinding {
                column: column.name.clone(),
                matches,
            });
        }

        let quarantine = (!quarantined.is_empty()).then(|| dataset.select(&quarantined));
        PhiScanOutcome {
            dataset: dataset.without(&quarantined),
            findings,
            quarantine,
        }
    }

    fn scan_column(&self, column: &Column) -> Option<Vec<PatternMatch>> {
        let cells: Vec<_> = column.present_text().collect();
        if cells.is_empty() {
            return None;
        }

        let mut matches: Vec<PatternMatch> = self
            .patterns
            .iter()
            .filter_map(|pattern| {
                let count = cells.iter().filter(|c| pattern.regex.is_match(c)).count();
                (count > 0).then(|| PatternMatch {
                    pattern: pattern.name.clone(),
                    count,
                })
            })
            .collect();

        // Name heuristic: catches obvious identifier columns whose values
        // match no pattern.
        let lowered = column.name.to_lowercase();
        if matches.is_empty() && self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            matches.push(PatternMatch {
                pattern: COLUMN_NAME_MATCH.to_string(),
                count: cells.len(),
            });
        }

        (!matches.is_empty()).then_some(matches)
    }
}
