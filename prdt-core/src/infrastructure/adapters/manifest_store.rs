// prdt-core/src/infrastructure/adapters/manifest_store.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::domain::ports::ManifestStore;
use crate::domain::project::RunManifest;
use crate::error::PrdtError;
use crate::infrastructure::fs::{ensure_dir, write_json};

/// Timestamped `manifest_<ts>.json` files kept in a run's output directory.
pub struct FsManifestStore {
    dir: PathBuf,
}

impl FsManifestStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Manifest files of the directory, oldest first.
    pub fn list(&self) -> Vec<PathBuf> {
        if !self.dir.is_dir() {
            return vec![];
        }
        let mut paths: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| RunManifest::is_manifest_file(&e.file_name().to_string_lossy()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();
        paths
    }

    fn read(path: &Path) -> Result<RunManifest, PrdtError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            DomainError::ManifestError(format!("{}: {}", path.display(), e)).into()
        })
    }
}

impl ManifestStore for FsManifestStore {
    #[instrument(skip(self, manifest), fields(dir = %self.dir.display()))]
    fn record(&self, manifest: &RunManifest) -> Result<PathBuf, PrdtError> {
        ensure_dir(&self.dir)?;
        let path = self.dir.join(manifest.file_name());
        write_json(&path, manifest)?;
        info!(path = %path.display(), "Run manifest recorded");
        Ok(path)
    }

    fn previous(&self) -> Result<Option<RunManifest>, PrdtError> {
        match self.list().last() {
            Some(latest) => Self::read(latest).map(Some),
            None => {
                debug!(dir = %self.dir.display(), "No earlier run to compare against");
                Ok(None)
            }
        }
    }
}
