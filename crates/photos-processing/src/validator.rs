use crate::sniff::DetectedKind;
use std::path::Path;

const MAX_FILENAME_LEN: usize = 255;
const FALLBACK_FILENAME: &str = "upload";

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,
}

/// Upload validator
///
/// Checks that happen before any byte is interpreted: size limits, and a
/// comparison of the declared MIME type against the sniffed one.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Whether the client-declared MIME type agrees with the detected kind.
    ///
    /// Advisory only: a mismatch is logged by the caller, never rejected.
    pub fn declared_matches(&self, declared: &str, detected: DetectedKind) -> bool {
        let normalized = normalize_mime(declared);
        let expected = detected.mime_type();

        if normalized == expected {
            return true;
        }

        // Aliases seen in the wild
        matches!(
            (expected, normalized.as_str()),
            ("image/jpeg", "image/jpg") | ("image/jpeg", "image/pjpeg") | ("image/png", "image/x-png")
        )
    }
}

/// Lowercase a MIME type and drop any parameters (`; charset=...`).
fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Human-facing filename for the record: the last path component, trimmed
/// and capped in length. Never used as a storage key.
pub fn display_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let base = Path::new(base)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(base)
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return FALLBACK_FILENAME.to_string();
    }

    base.chars().take(MAX_FILENAME_LEN).collect()
}
