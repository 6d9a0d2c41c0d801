// prdt-core/src/domain/compliance/drift.rs

use crate::domain::compliance::alerts::Alert;
use crate::domain::ports::PriorRunLookup;
use crate::domain::scales::ScaleScoreSummary;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Absolute change in a scale mean that counts as drift.
pub const DRIFT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftRecord {
    pub scale: String,
    pub previous_mean: f64,
    pub current_mean: f64,
    pub delta: f64,
}

impl DriftRecord {
    pub fn message(&self) -> String {
        format!("{} mean changed by {:+.2} vs last run", self.scale, self.delta)
    }

    pub fn to_alert(&self) -> Alert {
        Alert::Drift {
            scale: self.scale.clone(),
            previous_mean: self.previous_mean,
            current_mean: self.current_mean,
            delta: self.delta,
            message: self.message(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftOutcome {
    pub records: Vec<DriftRecord>,
    pub alerts: Vec<Alert>,
}

impl DriftOutcome {
    pub fn has_drift(&self) -> bool {
        !self.records.is_empty()
    }
}

pub struct DriftTracker;

impl DriftTracker {
    /// `current - previous` per scale known to both runs. Scales missing on
    /// either side, or without a mean, are skipped.
    pub fn compare(current: &[ScaleScoreSummary], prior: &impl PriorRunLookup) -> DriftOutcome {
        let mut outcome = DriftOutcome::default();

        for summary in current {
            let Some(current_mean) = summary.mean else {
                continue;
            };
            let Some(previous_mean) = prior.previous_scale_mean(&summary.name) else {
                debug!(scale = %summary.name, "No prior mean, skipping drift check");
                continue;
            };

            let delta = current_mean - previous_mean;
            if delta.abs() < DRIFT_THRESHOLD {
                continue;
            }

            let record = DriftRecord {
                scale: summary.name.clone(),
                previous_mean,
                current_mean,
                delta,
            };
            info!(scale = %record.scale, delta, "Scale mean drifted");
            outcome.alerts.push(record.to_alert());
            outcome.records.push(record);
        }
        outcome
    }
}
