// prdt-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Domain (Cœur du métier)
// Dataset, scales, reliability, PHI scanning, alerts, drift, report.
// Pure computations: no filesystem, no database.
pub mod domain;

// 2. Infrastructure (Adapters)
// DuckDB CSV source, YAML config, manifest store, atomic writes.
// Depends on the Domain and its ports.
pub mod infrastructure;

// 3. Application (Use Cases)
// Analysis orchestration, PHI export guard, run pipeline.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use prdt_core::PrdtError;
pub use error::PrdtError;
