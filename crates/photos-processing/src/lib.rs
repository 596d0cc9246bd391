//! Photos Processing Library
//!
//! The ingestion pipeline: raw upload bytes in, a stored original, a resized
//! derivative and an [`AssetRecord`](photos_core::AssetRecord) out.
//!
//! Components, leaves first:
//! - [`sniff`]: detect the real container format from magic bytes
//! - [`rational`]: fraction-encoded tag values to decimals and display strings
//! - [`metadata`]: EXIF block to [`AssetMetadata`](photos_core::AssetMetadata)
//! - [`naming`]: opaque storage identifiers
//! - [`image`]: derivative geometry and rendering
//! - [`ingest`]: the orchestrator tying them together

pub mod error;
pub mod image;
pub mod ingest;
pub mod metadata;
pub mod naming;
pub mod rational;
pub mod sniff;
pub mod validator;

// Re-export commonly used types
pub use error::{DerivativeError, IngestError, MetadataError};
pub use crate::image::{Breakpoint, Derivative, DerivativeGenerator};
pub use ingest::{IngestState, Ingested, Ingestor};
pub use metadata::extract;
pub use naming::{Clock, IdentifierGenerator, ManualClock, SystemClock};
pub use sniff::{sniff, DetectedKind};
pub use validator::{UploadValidator, ValidationError};
