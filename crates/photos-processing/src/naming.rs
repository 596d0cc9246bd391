//! Identifier generator
//!
//! Storage identifiers are a SHA-256 digest of `"{filename}_{uploader}_{nanos}"`,
//! rendered as 64 lowercase hex characters. The human filename never reaches
//! the storage namespace directly.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Source of high-resolution timestamps
pub trait Clock: Send + Sync {
    /// Nanoseconds since the Unix epoch
    fn now_nanos(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        // Out of range only after the year 2262
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicI64,
}

impl ManualClock {
    pub fn new(nanos: i64) -> Self {
        Self {
            nanos: AtomicI64::new(nanos),
        }
    }

    pub fn set(&self, nanos: i64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: i64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

/// Digest the seed for one naming attempt.
///
/// Attempt 0 uses the plain seed; retries append `_{attempt}` so that a
/// frozen clock still yields a fresh identifier.
pub fn generate(filename: &str, uploader: Uuid, nanos: i64, attempt: u32) -> String {
    let mut seed = format!("{}_{}_{}", filename, uploader, nanos);
    if attempt > 0 {
        seed.push_str(&format!("_{}", attempt));
    }

    hex::encode(Sha256::digest(seed.as_bytes()))
}

/// Generates identifiers from the injected clock.
#[derive(Clone)]
pub struct IdentifierGenerator {
    clock: Arc<dyn Clock>,
}

impl IdentifierGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Identifier for `attempt`, reading the clock afresh.
    pub fn next(&self, filename: &str, uploader: Uuid, attempt: u32) -> String {
        generate(filename, uploader, self.clock.now_nanos(), attempt)
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierGenerator").finish_non_exhaustive()
    }
}
