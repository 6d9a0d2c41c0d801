// prdt-core/src/domain/ports/dataset.rs

use crate::domain::dataset::Dataset;
use crate::error::PrdtError;
use std::path::Path;

/// Loads a raw table. Cells are handed over as text; numeric inference is
/// left to cleaning.
pub trait DatasetSource {
    fn load(&self, path: &Path) -> Result<Dataset, PrdtError>;
}

pub trait DatasetSink {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), PrdtError>;
}
