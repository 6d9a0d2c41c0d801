// prdt-core/src/domain/project/manifest.rs

use crate::domain::ports::PriorRunLookup;
use crate::domain::scales::ScaleScoreSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout of manifest file names. Lexical order is chronological order.
pub const MANIFEST_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";
pub const MANIFEST_PREFIX: &str = "manifest_";

/// What one run leaves behind for the next one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunManifest {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub rows: usize,
    pub columns: Vec<String>,

    #[serde(default)]
    pub scales: Vec<String>,

    /// Score summaries of the run; drift only reads the means.
    #[serde(default)]
    pub scale_scores: Vec<ScaleScoreSummary>,
}

impl RunManifest {
    pub fn file_name(&self) -> String {
        format!(
            "{MANIFEST_PREFIX}{}.json",
            self.generated_at.format(MANIFEST_TIMESTAMP_FORMAT)
        )
    }

    pub fn is_manifest_file(name: &str) -> bool {
        name.starts_with(MANIFEST_PREFIX) && name.ends_with(".json")
    }
}

impl PriorRunLookup for RunManifest {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64> {
        self.scale_scores
            .iter()
            .find(|s| s.name == scale)
            .and_then(|s| s.mean)
    }
}
