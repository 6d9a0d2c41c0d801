// prdt-core/src/domain/scales/mod.rs

pub mod definition;
pub mod interpret;
pub mod registry;
pub mod scorer;

// Re-exports
pub use definition::{Cutoffs, ScaleDefinition, ScoringMethod, reverse_code};
pub use interpret::{Band, Interpreter, parse_range};
pub use registry::ScaleRegistry;
pub use scorer::{ScaleMetadata, ScaleScoreSummary, ScaleScorer, score_definition, summarize_scores};
