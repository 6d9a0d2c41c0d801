// prdt/src/commands/mod.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use prdt_core::domain::project::ProjectConfig;
use prdt_core::infrastructure::config::load_project_config;

pub mod run;
pub mod scales;
pub mod scan;

/// Loads the project file: the explicit path, else one found in `search_dir`.
pub(crate) fn load_config(explicit: Option<&Path>, search_dir: &Path) -> anyhow::Result<ProjectConfig> {
    load_project_config(explicit, search_dir).with_context(|| match explicit {
        Some(path) => format!("Failed to load project configuration from {:?}", path),
        None => format!("Failed to load project configuration in {:?}", search_dir),
    })
}

/// Directory of the input file, where a project file is looked up by default.
pub(crate) fn input_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
