// prdt-core/src/infrastructure/config/mod.rs

pub mod project;

pub use crate::domain::project::ProjectConfig;
pub use project::{CONFIG_CANDIDATES, ENV_ALLOW_PHI_EXPORT, ENV_MISSING_PCT, load_project_config};
