//! Configuration module
//!
//! Ingestion settings loaded from the environment (and a `.env` file when
//! present), with defaults for every value.

use std::env;

use crate::storage_types::StorageBackend;

const LOCAL_STORAGE_PATH: &str = "./uploads";
const MAX_FILE_SIZE_MB: usize = 32;
const DERIVATIVE_WIDTH: u32 = 1920;
const DERIVATIVE_QUALITY: u8 = 75;
const DERIVATIVE_SUFFIX: &str = "_mobile";
const NAMING_MAX_ATTEMPTS: u32 = 3;

/// Ingestion pipeline configuration
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub max_file_size_bytes: usize,
    pub derivative_width: u32,
    pub derivative_quality: u8,
    pub derivative_suffix: String,
    pub naming_max_attempts: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Local,
            local_storage_path: LOCAL_STORAGE_PATH.to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            derivative_width: DERIVATIVE_WIDTH,
            derivative_quality: DERIVATIVE_QUALITY,
            derivative_suffix: DERIVATIVE_SUFFIX.to_string(),
            naming_max_attempts: NAMING_MAX_ATTEMPTS,
        }
    }
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::Local,
        };

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let derivative_quality = match lookup("DERIVATIVE_QUALITY") {
            Some(value) => value
                .trim()
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("DERIVATIVE_QUALITY must be a number between 1 and 100"))?,
            None => DERIVATIVE_QUALITY,
        };

        let config = IngestConfig {
            storage_backend,
            local_storage_path: lookup("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| LOCAL_STORAGE_PATH.to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            derivative_width: lookup("DERIVATIVE_WIDTH")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DERIVATIVE_WIDTH),
            derivative_quality,
            derivative_suffix: lookup("DERIVATIVE_SUFFIX")
                .unwrap_or_else(|| DERIVATIVE_SUFFIX.to_string()),
            naming_max_attempts: lookup("NAMING_MAX_ATTEMPTS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(NAMING_MAX_ATTEMPTS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(1..=100).contains(&self.derivative_quality) {
            return Err(anyhow::anyhow!(
                "DERIVATIVE_QUALITY must be between 1 and 100, got {}",
                self.derivative_quality
            ));
        }

        if self.derivative_width == 0 {
            return Err(anyhow::anyhow!("DERIVATIVE_WIDTH must be greater than 0"));
        }

        if self.derivative_suffix.trim().is_empty() {
            return Err(anyhow::anyhow!("DERIVATIVE_SUFFIX must not be empty"));
        }

        if self.derivative_suffix.contains('/') || self.derivative_suffix.contains("..") {
            return Err(anyhow::anyhow!(
                "DERIVATIVE_SUFFIX must not contain path separators"
            ));
        }

        if self.naming_max_attempts == 0 {
            return Err(anyhow::anyhow!("NAMING_MAX_ATTEMPTS must be at least 1"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
