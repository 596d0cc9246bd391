//! Ingestion orchestrator
//!
//! Sequences validation, sniffing, metadata extraction, naming, storage and
//! derivative rendering for one upload at a time. Holds no per-upload state
//! between calls, so one [`Ingestor`] can serve concurrent uploads.

mod pipeline;
mod types;

pub use pipeline::Ingestor;
pub use types::{IngestState, Ingested};
