// prdt-core/src/domain/ports/mod.rs

pub mod dataset;
pub mod manifest;
pub mod prior_run;

pub use dataset::{DatasetSink, DatasetSource};
pub use manifest::ManifestStore;
pub use prior_run::{NoPriorRun, PriorRunLookup};
