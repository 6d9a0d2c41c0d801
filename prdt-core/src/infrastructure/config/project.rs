// prdt-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["prdt.yaml", "prdt_project.yaml"];
pub const ENV_ALLOW_PHI_EXPORT: &str = "PRDT_ALLOW_PHI_EXPORT";
pub const ENV_MISSING_PCT: &str = "PRDT_MISSING_PCT";

/// Loads the project file.
///
/// An explicit path must exist. Otherwise `search_dir` is searched for the
/// known file names, and defaults apply when none is there.
#[instrument(skip_all)]
pub fn load_project_config(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<ProjectConfig, InfrastructureError> {
    let path = match explicit {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(InfrastructureError::ConfigNotFound(p.display().to_string())),
        None => find_main_config(search_dir),
    };

    let mut config = match path {
        Some(path) => {
            info!(path = ?path, "Loading project configuration");
            parse_config(&path)?
        }
        None => {
            info!(dir = ?search_dir, "No project file found, using defaults");
            ProjectConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn parse_config(path: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// `PRDT_ALLOW_PHI_EXPORT` (any value) and `PRDT_MISSING_PCT` (float).
fn apply_env_overrides(
    config: &mut ProjectConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if env(ENV_ALLOW_PHI_EXPORT).is_some() {
        info!("PHI export allowed via ENV");
        config.phi.allow_export = true;
    }
    if let Some(raw) = env(ENV_MISSING_PCT) {
        let pct = raw.trim().parse::<f64>().map_err(|_| {
            warn!(value = %raw, "Malformed missingness threshold");
            InfrastructureError::ConfigError(format!("{ENV_MISSING_PCT} must be a number, got '{raw}'"))
        })?;
        info!(old = ?config.alerts.missing_pct, new = pct, "Overriding missingness threshold via ENV");
        config.alerts.missing_pct = Some(pct);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_discovers_default_file_name() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("prdt_project.yaml"), "name: found\nscales: [phq9]\n")?;
        let config = load_project_config(None, dir.path())?;
        assert_eq!(config.name, "found");
        assert_eq!(config.scales, vec!["phq9"]);
        Ok(())
    }

    #[test]
    fn test_no_file_means_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = load_project_config(None, dir.path())?;
        assert!(config.scales.is_empty());
        assert!(config.phi.enabled);
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_fails() -> Result<()> {
        let dir = tempdir()?;
        let res = load_project_config(Some(&dir.path().join("nope.yaml")), dir.path());
        assert!(matches!(res, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_invalid_thresholds_fail_validation() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("prdt.yaml");
        fs::write(&path, "alerts:\n  missing_pct: 250\n")?;
        let res = load_project_config(Some(&path), dir.path());
        assert!(matches!(res, Err(InfrastructureError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let mut config = ProjectConfig::default();
        apply_env_overrides(
            &mut config,
            env_of(&[(ENV_ALLOW_PHI_EXPORT, "1"), (ENV_MISSING_PCT, "12.5")]),
        )?;
        assert!(config.phi.allow_export);
        assert_eq!(config.alerts.missing_pct, Some(12.5));

        let res = apply_env_overrides(&mut config, env_of(&[(ENV_MISSING_PCT, "lots")]));
        assert!(matches!(res, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }
}
