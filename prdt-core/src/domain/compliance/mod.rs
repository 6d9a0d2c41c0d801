// prdt-core/src/domain/compliance/mod.rs

pub mod alerts;
pub mod drift;

// Re-exports
pub use alerts::{Alert, AlertEvaluator, AlertRuleSet, OVERALL_TARGET, PHI_ALERT_MESSAGE};
pub use drift::{DRIFT_THRESHOLD, DriftOutcome, DriftRecord, DriftTracker};
