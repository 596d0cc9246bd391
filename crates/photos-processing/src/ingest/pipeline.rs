use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use photos_core::{
    log_error, AssetMetadata, AssetRecord, Catalog, CatalogError, IngestConfig, RawUpload,
};
use photos_storage::{derivative_key, Storage, StorageError};
use uuid::Uuid;

use super::types::{IngestState, Ingested};
use crate::error::{DerivativeError, IngestError};
use crate::image::{Derivative, DerivativeGenerator, ImageProcessor};
use crate::metadata::extract;
use crate::naming::{Clock, IdentifierGenerator};
use crate::sniff::sniff;
use crate::validator::{display_filename, UploadValidator};

/// Runs uploads through the ingestion pipeline against one storage backend.
#[derive(Clone)]
pub struct Ingestor {
    storage: Arc<dyn Storage>,
    names: IdentifierGenerator,
    validator: UploadValidator,
    derivatives: DerivativeGenerator,
    derivative_suffix: String,
    naming_max_attempts: u32,
}

impl Ingestor {
    pub fn new(storage: Arc<dyn Storage>, config: &IngestConfig) -> Self {
        Self {
            storage,
            names: IdentifierGenerator::default(),
            validator: UploadValidator::new(config.max_file_size_bytes),
            derivatives: DerivativeGenerator::new(
                config.derivative_width,
                config.derivative_quality,
            ),
            derivative_suffix: config.derivative_suffix.clone(),
            naming_max_attempts: config.naming_max_attempts.max(1),
        }
    }

    /// Replace the clock used for identifier seeds.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.names = IdentifierGenerator::new(clock);
        self
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn derivative_suffix(&self) -> &str {
        &self.derivative_suffix
    }

    /// Ingest one upload.
    ///
    /// Unsupported content and invalid sizes are rejected before anything is
    /// written. A failed write of the original is fatal. Missing metadata
    /// and a failed derivative are reported on the returned [`Ingested`].
    #[tracing::instrument(
        skip_all,
        fields(
            uploader = %upload.uploader,
            filename = %upload.filename,
            size_bytes = upload.len()
        )
    )]
    pub async fn ingest(&self, upload: RawUpload) -> Result<Ingested, IngestError> {
        let result = self.run(upload).await;
        if let Err(e) = &result {
            log_error(e);
        }
        result
    }

    async fn run(&self, upload: RawUpload) -> Result<Ingested, IngestError> {
        let started = Instant::now();
        let RawUpload {
            data,
            declared_mime,
            filename,
            uploader,
        } = upload;

        enter(IngestState::Validating);
        self.validator.validate_file_size(data.len())?;

        let kind = match sniff(&data) {
            Some(kind) if kind.is_supported() => kind,
            other => {
                return Err(IngestError::UnsupportedType {
                    declared: declared_mime,
                    detected: other.map(|k| k.mime_type().to_string()),
                })
            }
        };

        if !self.validator.declared_matches(&declared_mime, kind) {
            tracing::warn!(
                declared = %declared_mime,
                detected = kind.mime_type(),
                "Declared content type does not match file contents"
            );
        }

        enter(IngestState::Extracting);
        let (mut metadata, metadata_error) = match extract(&data) {
            Ok(metadata) => (metadata, None),
            Err(e) => {
                tracing::warn!(error = %e, "Metadata unavailable, continuing without it");
                (AssetMetadata::default(), Some(e))
            }
        };

        if metadata.width.is_none() || metadata.height.is_none() {
            if let Some((width, height)) = ImageProcessor::get_dimensions(&data) {
                metadata.width = Some(width);
                metadata.height = Some(height);
            }
        }

        enter(IngestState::Naming);
        let key = self.allocate_key(&filename, uploader).await?;

        enter(IngestState::StoringOriginal);
        let size = data.len() as u64;
        let data = Bytes::from(data);
        if let Err(e) = self
            .storage
            .put(&key, kind.mime_type(), data.clone())
            .await
        {
            tracing::error!(error = %e, storage_key = %key, "Failed to store original");
            return Err(e.into());
        }

        enter(IngestState::Deriving);
        let (derivative_key, derivative_error) = match self.derive(&key, data).await {
            Ok(derivative_key) => (Some(derivative_key), None),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    storage_key = %key,
                    "Derivative not produced, original is stored"
                );
                (None, Some(e))
            }
        };

        enter(IngestState::Done);
        let ingested = Ingested {
            record: AssetRecord {
                id: None,
                owner: uploader,
                name: display_filename(&filename),
                hash: key,
                size,
                extension: kind.extension().to_string(),
                mime_type: kind.mime_type().to_string(),
                metadata,
            },
            derivative_key,
            metadata_error,
            derivative_error,
        };

        tracing::info!(
            storage_key = %ingested.record.hash,
            mime_type = %ingested.record.mime_type,
            degraded = ingested.is_degraded(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Upload ingested"
        );

        Ok(ingested)
    }

    /// Pick an identifier no stored object uses yet.
    async fn allocate_key(&self, filename: &str, uploader: Uuid) -> Result<String, StorageError> {
        for attempt in 0..self.naming_max_attempts {
            let key = self.names.next(filename, uploader, attempt);
            if !self.storage.exists(&key).await? {
                return Ok(key);
            }
            tracing::warn!(storage_key = %key, attempt = attempt, "Storage identifier taken, regenerating");
        }

        Err(StorageError::KeyConflict {
            attempts: self.naming_max_attempts,
        })
    }

    async fn derive(&self, key: &str, data: Bytes) -> Result<String, DerivativeError> {
        let generator = self.derivatives.clone();
        let derivative = tokio::task::spawn_blocking(move || generator.render(&data))
            .await
            .map_err(|e| DerivativeError::Task(e.to_string()))??;

        let derivative_key = derivative_key(key, &self.derivative_suffix);
        self.storage
            .put(
                &derivative_key,
                Derivative::CONTENT_TYPE,
                Bytes::from(derivative.data),
            )
            .await?;

        tracing::debug!(
            storage_key = %derivative_key,
            width = derivative.width,
            height = derivative.height,
            "Derivative stored"
        );

        Ok(derivative_key)
    }

    /// Hand the record to the catalog and fill in the identity it assigns.
    ///
    /// When the catalog backend fails, the original and derivative are
    /// deleted again so no stored object is left without a catalog entry. A
    /// duplicate leaves storage alone: the key belongs to the asset that is
    /// already catalogued.
    pub async fn register(
        &self,
        mut ingested: Ingested,
        catalog: &dyn Catalog,
    ) -> Result<Ingested, IngestError> {
        let owner = ingested.record.owner;
        match catalog.insert(&ingested.record, owner).await {
            Ok(id) => {
                tracing::info!(asset_id = %id, storage_key = %ingested.record.hash, "Asset registered");
                ingested.record.id = Some(id);
                Ok(ingested)
            }
            Err(e) => {
                match &e {
                    CatalogError::Duplicate(_) => tracing::warn!(
                        storage_key = %ingested.record.hash,
                        "Storage identifier already catalogued, keeping stored objects"
                    ),
                    CatalogError::Backend(_) => self.discard(&ingested.record.hash).await,
                }
                let err = IngestError::from(e);
                log_error(&err);
                Err(err)
            }
        }
    }

    async fn discard(&self, key: &str) {
        let keys = [
            key.to_string(),
            derivative_key(key, &self.derivative_suffix),
        ];
        for key in &keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::error!(error = %e, storage_key = %key, "Failed to remove orphaned object");
            }
        }
    }
}

fn enter(state: IngestState) {
    tracing::debug!(state = %state, "Ingest state");
}
