// prdt-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod manifest_store;

pub use self::duckdb::DuckDbCsv;
pub use manifest_store::FsManifestStore;
