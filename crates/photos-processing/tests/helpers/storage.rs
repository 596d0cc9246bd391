//! Storage and catalog doubles that fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use photos_core::{AssetRecord, Catalog, CatalogError, StorageBackend};
use photos_storage::{ByteStream, MemoryStorage, Storage, StorageError, StorageResult};
use uuid::Uuid;

/// Which writes a [`FailingStorage`] refuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Every put
    AllWrites,
    /// Puts whose key ends with the given suffix
    Suffix(&'static str),
}

/// Memory storage whose writes can be made to fail.
pub struct FailingStorage {
    pub inner: MemoryStorage,
    fail_on: FailOn,
    pub rejected_writes: AtomicUsize,
}

impl FailingStorage {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            inner: MemoryStorage::new(),
            fail_on,
            rejected_writes: AtomicUsize::new(0),
        }
    }

    fn should_fail(&self, key: &str) -> bool {
        match self.fail_on {
            FailOn::AllWrites => true,
            FailOn::Suffix(suffix) => key.ends_with(suffix),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        if self.should_fail(key) {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(StorageError::WriteFailed(format!("refusing to write {}", key)));
        }
        self.inner.put(key, content_type, data).await
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.inner.get(key).await
    }

    async fn open_read(&self, key: &str) -> StorageResult<ByteStream> {
        self.inner.open_read(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Memory storage whose existence answers arrive a scheduler turn late, so
/// concurrent uploads can both see an identifier as free.
#[derive(Default)]
pub struct SlowExistsStorage {
    pub inner: MemoryStorage,
}

impl SlowExistsStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for SlowExistsStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.inner.put(key, content_type, data).await
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.inner.get(key).await
    }

    async fn open_read(&self, key: &str) -> StorageResult<ByteStream> {
        self.inner.open_read(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let found = self.inner.exists(key).await?;
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Catalog that rejects every insert.
pub struct UnavailableCatalog;

#[async_trait]
impl Catalog for UnavailableCatalog {
    async fn insert(&self, _record: &AssetRecord, _owner: Uuid) -> Result<Uuid, CatalogError> {
        Err(CatalogError::Backend("connection refused".to_string()))
    }

    async fn get(&self, _id: Uuid) -> Result<Option<AssetRecord>, CatalogError> {
        Ok(None)
    }
}
