// prdt-core/src/application/guard.rs

use crate::domain::error::DomainError;
use crate::domain::governance::PhiScanOutcome;
use tracing::warn;

/// Decides whether a run may go on after PHI was quarantined.
pub struct PhiExportGuard {
    allow_export: bool,
}

impl PhiExportGuard {
    pub fn new(allow_export: bool) -> Self {
        Self { allow_export }
    }

    /// Blocks the run when columns were quarantined and exporting them is not
    /// allowed. Allow-listed columns never block.
    pub fn check(&self, outcome: &PhiScanOutcome) -> Result<(), DomainError> {
        let quarantined = outcome.quarantined_columns();
        if quarantined.is_empty() {
            return Ok(());
        }

        if self.allow_export {
            warn!(
                columns = %quarantined.join(", "),
                "PHI quarantine will be exported (export explicitly allowed)"
            );
            return Ok(());
        }

        Err(DomainError::PhiExportBlocked {
            columns: quarantined.join(", "),
        })
    }

    pub fn allows_export(&self) -> bool {
        self.allow_export
    }
}
