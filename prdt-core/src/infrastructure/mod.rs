// prdt-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;

pub use adapters::{DuckDbCsv, FsManifestStore};
pub use config::load_project_config;
