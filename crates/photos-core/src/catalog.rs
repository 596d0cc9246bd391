//! Catalog collaborator
//!
//! The ingestion pipeline never writes to the catalog itself; it hands the
//! finished [`AssetRecord`] to whoever implements this trait. Query shape and
//! transaction boundaries belong to the implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::AssetRecord;

/// Catalog operation errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Asset already catalogued: {0}")]
    Duplicate(String),

    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Persistence collaborator for asset records
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert a record for `owner` and return the identity assigned to it.
    async fn insert(&self, record: &AssetRecord, owner: Uuid) -> Result<Uuid, CatalogError>;

    /// Look up a record by its assigned identity.
    async fn get(&self, id: Uuid) -> Result<Option<AssetRecord>, CatalogError>;
}

/// Catalog kept in process memory. Storage hashes are unique.
#[derive(Default)]
pub struct InMemoryCatalog {
    records: RwLock<HashMap<Uuid, AssetRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// All records owned by `owner`, in no particular order.
    pub async fn list_for_owner(&self, owner: Uuid) -> Vec<AssetRecord> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn insert(&self, record: &AssetRecord, owner: Uuid) -> Result<Uuid, CatalogError> {
        let mut records = self.records.write().await;

        if records.values().any(|r| r.hash == record.hash) {
            return Err(CatalogError::Duplicate(record.hash.clone()));
        }

        let id = Uuid::new_v4();
        let mut stored = record.clone();
        stored.id = Some(id);
        stored.owner = owner;
        records.insert(id, stored);

        tracing::debug!(asset_id = %id, owner = %owner, hash = %record.hash, "Asset catalogued");

        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AssetRecord>, CatalogError> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}
