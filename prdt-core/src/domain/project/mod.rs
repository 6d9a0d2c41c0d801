// prdt-core/src/domain/project/mod.rs

pub mod configuration;
pub mod manifest;

pub use configuration::ProjectConfig;
pub use manifest::{MANIFEST_PREFIX, MANIFEST_TIMESTAMP_FORMAT, RunManifest};
