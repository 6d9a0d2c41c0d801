// prdt-core/src/domain/governance/mod.rs

pub mod phi;
pub mod scanner;

// Re-exports
pub use phi::{COLUMN_NAME_MATCH, DEFAULT_KEYWORDS, PhiOptions, PhiPattern, builtin_patterns};
pub use scanner::{PatternMatch, PhiFinding, PhiScanOutcome, PhiScanner};
