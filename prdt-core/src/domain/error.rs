// prdt-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown scale '{name}'. Available: {available}")]
    #[diagnostic(
        code(prdt::domain::unknown_scale),
        help("Declare it under 'custom_scales' or pick one of the registered scales.")
    )]
    UnknownScale { name: String, available: String },

    #[error("Missing items for '{target}': {missing}")]
    #[diagnostic(
        code(prdt::domain::unknown_items),
        help("Item columns are matched after name normalization (lower case, '_' for spaces).")
    )]
    UnknownItems { target: String, missing: String },

    #[error("Invalid PHI pattern '{name}': {reason}")]
    #[diagnostic(code(prdt::domain::invalid_pattern))]
    InvalidPattern { name: String, reason: String },

    #[error("Scale '{0}' has no items")]
    #[diagnostic(code(prdt::domain::empty_scale))]
    EmptyScale(String),

    #[error("Dataset shape error: {0}")]
    #[diagnostic(code(prdt::domain::dataset_shape))]
    DatasetShape(String),

    #[error("PHI detected in columns: {columns} (use --allow-phi-export to write the quarantine)")]
    #[diagnostic(
        code(prdt::domain::phi_export),
        help("Remove or anonymize these columns before sharing the outputs.")
    )]
    PhiExportBlocked { columns: String },

    #[error("Manifest Error: {0}")]
    #[diagnostic(code(prdt::domain::manifest))]
    ManifestError(String),
}
