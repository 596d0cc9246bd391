//! Photos Core Library
//!
//! This crate provides the domain models, configuration, error metadata and
//! collaborator traits shared by the storage, processing and CLI crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, InMemoryCatalog};
pub use config::IngestConfig;
pub use error::{log_error, ErrorMetadata, LogLevel};
pub use models::{AssetMetadata, AssetRecord, GeoPoint, RawUpload};
pub use storage_types::StorageBackend;
