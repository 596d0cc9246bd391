use std::fmt;

use photos_core::AssetRecord;

use crate::error::{DerivativeError, MetadataError};

/// Orchestrator states, in order. Any state may end in a failure instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestState {
    Validating,
    Extracting,
    Naming,
    StoringOriginal,
    Deriving,
    Done,
}

impl fmt::Display for IngestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestState::Validating => write!(f, "validating"),
            IngestState::Extracting => write!(f, "extracting"),
            IngestState::Naming => write!(f, "naming"),
            IngestState::StoringOriginal => write!(f, "storing_original"),
            IngestState::Deriving => write!(f, "deriving"),
            IngestState::Done => write!(f, "done"),
        }
    }
}

/// Outcome of a successful ingestion.
///
/// The original is always stored. Metadata and the derivative may be
/// missing; the reason is kept here instead of being dropped.
#[derive(Debug)]
pub struct Ingested {
    pub record: AssetRecord,
    /// Storage key of the derivative, when one was written
    pub derivative_key: Option<String>,
    pub metadata_error: Option<MetadataError>,
    pub derivative_error: Option<DerivativeError>,
}

impl Ingested {
    /// True when metadata or the derivative is missing.
    pub fn is_degraded(&self) -> bool {
        self.metadata_error.is_some() || self.derivative_error.is_some()
    }

    pub fn storage_key(&self) -> &str {
        &self.record.hash
    }

    pub fn into_record(self) -> AssetRecord {
        self.record
    }
}
