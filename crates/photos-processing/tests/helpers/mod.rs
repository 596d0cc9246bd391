//! Test helpers: build an Ingestor over in-memory or failing storage.
//!
//! Run from workspace root: `cargo test -p photos-processing`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::sync::Arc;

use photos_core::{IngestConfig, RawUpload, StorageBackend};
use photos_processing::{Ingestor, ManualClock};
use photos_storage::{MemoryStorage, Storage};
use uuid::Uuid;

/// Config for tests: memory backend, small derivatives.
pub fn test_config() -> IngestConfig {
    IngestConfig {
        storage_backend: StorageBackend::Memory,
        derivative_width: 64,
        ..IngestConfig::default()
    }
}

pub struct TestApp {
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
    pub ingestor: Ingestor,
}

/// Ingestor over a fresh in-memory store with a frozen clock.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config())
}

pub fn setup_test_app_with(config: IngestConfig) -> TestApp {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000_000_000));
    let ingestor = Ingestor::new(storage.clone(), &config).with_clock(clock.clone());
    TestApp {
        storage,
        clock,
        ingestor,
    }
}

/// Ingestor over an arbitrary backend.
pub fn ingestor_over(storage: Arc<dyn Storage>) -> Ingestor {
    Ingestor::new(storage, &test_config()).with_clock(Arc::new(ManualClock::new(42)))
}

pub fn upload(data: Vec<u8>, declared_mime: &str, filename: &str) -> RawUpload {
    RawUpload::new(data, declared_mime, filename, Uuid::new_v4())
}
