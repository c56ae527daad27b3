//! Runtime environment helpers
//!
//! Wires configuration into a ready-to-serve record store so binaries do not
//! need to know about backends.

use std::sync::Arc;

use configs::StorageConfig;
use tracing::info;

use crate::records::{RecordRepository, RecordStore};
use crate::storage::FileBackend;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(public_dir: &str, data_file: &str) -> anyhow::Result<()> {
    common::env::ensure_env(public_dir, data_file).await
}

/// Check the environment and open the file-backed store described by `cfg`.
pub async fn open_file_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn RecordRepository>> {
    ensure_env(&cfg.public_dir, &cfg.data_file).await?;
    let store = RecordStore::new(FileBackend::new(&cfg.data_file), cfg.merge_policy);
    info!(data_file = %cfg.data_file, merge_policy = ?cfg.merge_policy, "record store opened");
    Ok(Arc::new(store))
}
