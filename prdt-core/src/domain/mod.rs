// prdt-core/src/domain/mod.rs

pub mod compliance;
pub mod dataset;
pub mod error;
pub mod governance;
pub mod ordered;
pub mod ports;
pub mod project;
pub mod reliability;
pub mod report;
pub mod scales;
pub mod stats;

pub use error::DomainError;
