// prdt-core/src/application/mod.rs

pub mod analysis;
pub mod guard;
pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use prdt_core::application::{run_with_defaults, RunRequest};`

pub use analysis::{Analysis, analyze, registry_for, screen};
pub use guard::PhiExportGuard;
pub use pipeline::{RunRequest, RunSummary, run, run_with_defaults, scan};
