// prdt-core/src/domain/ports/manifest.rs

use crate::domain::project::RunManifest;
use crate::error::PrdtError;
use std::path::PathBuf;

/// Run history for one output location.
pub trait ManifestStore {
    /// Persists the manifest of the current run and returns where it went.
    fn record(&self, manifest: &RunManifest) -> Result<PathBuf, PrdtError>;

    /// The most recently recorded run. Read before the current run is
    /// recorded. `None` when nothing has been recorded yet.
    fn previous(&self) -> Result<Option<RunManifest>, PrdtError>;
}
