//! Photos Storage Library
//!
//! This crate provides the storage abstraction consumed by the ingestion
//! pipeline, with a local filesystem backend and an in-memory backend.
//!
//! # Storage key format
//!
//! Keys are flat and opaque: the original asset lives under `{id}` and its
//! derivative under `{id}{suffix}` (by default `{id}_mobile`). Keys must not
//! be empty, contain `..` or a backslash, or start with `/`. Key handling is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{derivative_key, validate_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use photos_core::StorageBackend;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
