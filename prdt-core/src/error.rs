// prdt-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrdtError {
    // --- DOMAIN (unknown scales, missing items, PHI guard) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, CSV, YAML) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe output path detected: {0}")]
    UnsafePath(String),
}

impl From<std::io::Error> for PrdtError {
    fn from(err: std::io::Error) -> Self {
        PrdtError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<serde_json::Error> for PrdtError {
    fn from(err: serde_json::Error) -> Self {
        PrdtError::Infrastructure(InfrastructureError::JsonError(err))
    }
}
