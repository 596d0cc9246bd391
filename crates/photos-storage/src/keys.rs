//! Shared key handling for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that could escape the storage namespace.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    if key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }

    Ok(())
}

/// Key of the resized copy stored next to the original `id`.
pub fn derivative_key(id: &str, suffix: &str) -> String {
    format!("{}{}", id, suffix)
}
