//! Pipeline error taxonomy
//!
//! Only [`IngestError`] aborts an ingestion. [`MetadataError`] and
//! [`DerivativeError`] are soft: they travel inside a successful
//! [`Ingested`](crate::Ingested) result.

use photos_core::{CatalogError, ErrorMetadata, LogLevel};
use photos_storage::StorageError;

use crate::validator::ValidationError;

/// Fatal ingestion failures
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Unsupported file type: detected {}, declared {declared}", .detected.as_deref().unwrap_or("unknown"))]
    UnsupportedType {
        declared: String,
        detected: Option<String>,
    },

    #[error("Invalid upload: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl ErrorMetadata for IngestError {
    fn http_status_code(&self) -> u16 {
        match self {
            IngestError::UnsupportedType { .. } => 415,
            IngestError::Invalid(ValidationError::FileTooLarge { .. }) => 413,
            IngestError::Invalid(ValidationError::EmptyFile) => 400,
            IngestError::Storage(_) => 500,
            IngestError::Catalog(CatalogError::Duplicate(_)) => 409,
            IngestError::Catalog(CatalogError::Backend(_)) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IngestError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            IngestError::Invalid(ValidationError::FileTooLarge { .. }) => "PAYLOAD_TOO_LARGE",
            IngestError::Invalid(ValidationError::EmptyFile) => "EMPTY_UPLOAD",
            IngestError::Storage(_) => "STORAGE_ERROR",
            IngestError::Catalog(CatalogError::Duplicate(_)) => "DUPLICATE_ASSET",
            IngestError::Catalog(CatalogError::Backend(_)) => "DATABASE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IngestError::Storage(_) | IngestError::Catalog(CatalogError::Backend(_))
        )
    }

    fn client_message(&self) -> String {
        match self {
            IngestError::UnsupportedType { .. } => {
                "The file format is not valid. Only JPEG and PNG images are accepted.".to_string()
            }
            IngestError::Invalid(e) => e.to_string(),
            IngestError::Storage(_) | IngestError::Catalog(CatalogError::Backend(_)) => {
                "The file could not be stored. Please retry.".to_string()
            }
            IngestError::Catalog(CatalogError::Duplicate(_)) => {
                "This asset has already been registered.".to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        if self.is_client_error() {
            LogLevel::Debug
        } else {
            LogLevel::Error
        }
    }
}

/// The embedded metadata block could not be located or decoded.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("No metadata block found: {0}")]
    NotFound(String),

    #[error("Malformed metadata block: {0}")]
    Malformed(String),
}

impl From<exif::Error> for MetadataError {
    fn from(err: exif::Error) -> Self {
        match err {
            exif::Error::NotFound(what) => MetadataError::NotFound(what.to_string()),
            other => MetadataError::Malformed(other.to_string()),
        }
    }
}

/// The derivative could not be produced or stored. The original is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum DerivativeError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode derivative: {0}")]
    Encode(String),

    #[error("Failed to store derivative: {0}")]
    Storage(#[from] StorageError),

    #[error("Derivative task failed: {0}")]
    Task(String),
}
