use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Trait abstraction for whole-document storage.
/// Implementations can be file-backed, in-memory, or remote.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the full document; `None` when it has never been written.
    async fn load(&self) -> Result<Option<Vec<u8>>, ServiceError>;
    /// Replace the full document.
    async fn save(&self, bytes: Vec<u8>) -> Result<(), ServiceError>;
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Single JSON file on local disk.
#[derive(Clone, Debug)]
pub struct FileBackend {
    file_path: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::storage(&format!("read {}", self.file_path.display()), e)),
        }
    }

    async fn save(&self, bytes: Vec<u8>) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(&format!("create {}", parent.display()), e))?;
        }
        // Readers outside this process never see a half-written document.
        let staging = self.staging_path();
        fs::write(&staging, bytes)
            .await
            .map_err(|e| ServiceError::storage(&format!("write {}", staging.display()), e))?;
        fs::rename(&staging, &self.file_path)
            .await
            .map_err(|e| ServiceError::storage(&format!("replace {}", self.file_path.display()), e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

/// Document held in memory; used by tests and ephemeral demos.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self { inner: RwLock::new(Some(bytes.into())) }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, bytes: Vec<u8>) -> Result<(), ServiceError> {
        *self.inner.write().await = Some(bytes);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_backend_missing_then_roundtrip() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir()
            .join(format!("city_backend_{}", uuid::Uuid::new_v4()))
            .join("data.json");
        let backend = FileBackend::new(&tmp);

        assert!(backend.load().await?.is_none());

        backend.save(br#"{"a":1}"#.to_vec()).await?;
        assert_eq!(backend.load().await?.as_deref(), Some(&br#"{"a":1}"#[..]));
        assert!(fs::metadata(backend.staging_path()).await.is_err());

        backend.save(b"{}".to_vec()).await?;
        assert_eq!(backend.load().await?.as_deref(), Some(&b"{}"[..]));

        if let Some(dir) = tmp.parent() {
            let _ = fs::remove_dir_all(dir).await;
        }
        Ok(())
    }

    #[tokio::test]
    async fn memory_backend_starts_empty() -> Result<(), anyhow::Error> {
        let backend = MemoryBackend::new();
        assert!(backend.load().await?.is_none());
        backend.save(b"{}".to_vec()).await?;
        assert_eq!(backend.load().await?, Some(b"{}".to_vec()));

        let seeded = MemoryBackend::with_document(r#"{"k":true}"#);
        assert_eq!(seeded.load().await?, Some(br#"{"k":true}"#.to_vec()));
        Ok(())
    }
}
