//! Record store: get, merge and purge over a single JSON document.
//!
//! Every mutation reads the document, transforms it and writes it back while
//! holding the store's write lock, so concurrent requests cannot interleave
//! their read and write phases. Reads share the lock.

pub mod merge;

use async_trait::async_trait;
use configs::MergePolicy;
use models::RecordCollection;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::StorageBackend;

pub use merge::MergeOutcome;

/// Raw document as last written, plus its key count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub bytes: Vec<u8>,
    pub keys: usize,
}

/// Trait abstraction the HTTP layer depends on.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn snapshot(&self) -> Result<Snapshot, ServiceError>;
    async fn merge(&self, incoming: RecordCollection) -> Result<MergeOutcome, ServiceError>;
    /// Remove `key`; returns whether it existed. Absent keys are not an error.
    async fn purge(&self, key: &str) -> Result<bool, ServiceError>;
}

pub struct RecordStore<B> {
    backend: B,
    policy: MergePolicy,
    gate: RwLock<()>,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B, policy: MergePolicy) -> Self {
        Self { backend, policy, gate: RwLock::new(()) }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    async fn load(&self) -> Result<(Option<Vec<u8>>, RecordCollection), ServiceError> {
        let raw = self.backend.load().await?;
        let collection = match raw.as_deref() {
            Some(bytes) => RecordCollection::from_slice(bytes).map_err(ServiceError::Corrupt)?,
            None => RecordCollection::new(),
        };
        Ok((raw, collection))
    }

    async fn store(&self, collection: &RecordCollection) -> Result<(), ServiceError> {
        let bytes = collection.to_vec().map_err(|e| ServiceError::storage("encode document", e))?;
        self.backend.save(bytes).await
    }

    /// Current document bytes. A document that was never written reads as `{}`.
    pub async fn snapshot(&self) -> Result<Snapshot, ServiceError> {
        let _read = self.gate.read().await;
        let (raw, collection) = self.load().await?;
        let bytes = match raw {
            Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
            _ => b"{}".to_vec(),
        };
        debug!(backend = %self.backend.describe(), keys = collection.len(), "document read");
        Ok(Snapshot { bytes, keys: collection.len() })
    }

    pub async fn merge(&self, incoming: RecordCollection) -> Result<MergeOutcome, ServiceError> {
        let _write = self.gate.write().await;
        let (_, existing) = self.load().await?;
        let (merged, outcome) = merge::merge(existing, incoming, self.policy);
        self.store(&merged).await?;
        info!(
            submitted = outcome.submitted,
            collisions = outcome.collisions,
            total = outcome.total,
            policy = ?self.policy,
            "records merged"
        );
        Ok(outcome)
    }

    pub async fn purge(&self, key: &str) -> Result<bool, ServiceError> {
        let _write = self.gate.write().await;
        let (_, mut collection) = self.load().await?;
        if collection.remove(key).is_none() {
            debug!(%key, "purge of absent key");
            return Ok(false);
        }
        self.store(&collection).await?;
        info!(%key, remaining = collection.len(), "record purged");
        Ok(true)
    }
}

#[async_trait]
impl<B: StorageBackend> RecordRepository for RecordStore<B> {
    async fn snapshot(&self) -> Result<Snapshot, ServiceError> { RecordStore::snapshot(self).await }
    async fn merge(&self, incoming: RecordCollection) -> Result<MergeOutcome, ServiceError> { RecordStore::merge(self, incoming).await }
    async fn purge(&self, key: &str) -> Result<bool, ServiceError> { RecordStore::purge(self, key).await }
}
