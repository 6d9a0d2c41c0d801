// prdt-core/src/domain/ports/prior_run.rs

use std::collections::{BTreeMap, HashMap};

/// Read-only view of the previous run's scale means.
pub trait PriorRunLookup {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64>;
}

/// First run: nothing to compare against.
pub struct NoPriorRun;

impl PriorRunLookup for NoPriorRun {
    fn previous_scale_mean(&self, _scale: &str) -> Option<f64> {
        None
    }
}

impl PriorRunLookup for BTreeMap<String, f64> {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64> {
        self.get(scale).copied()
    }
}

impl PriorRunLookup for HashMap<String, f64> {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64> {
        self.get(scale).copied()
    }
}

impl<T: PriorRunLookup + ?Sized> PriorRunLookup for &T {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64> {
        (**self).previous_scale_mean(scale)
    }
}

impl<T: PriorRunLookup> PriorRunLookup for Option<T> {
    fn previous_scale_mean(&self, scale: &str) -> Option<f64> {
        self.as_ref()?.previous_scale_mean(scale)
    }
}
