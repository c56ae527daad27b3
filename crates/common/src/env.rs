//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data file's directory exists; warn when the static assets
/// directory or the data document itself is missing.
pub async fn ensure_env(public_dir: &str, data_file: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(public_dir).await.is_err() {
        warn!(%public_dir, "public assets directory not found; static assets may 404");
    }
    if let Some(parent) = Path::new(data_file).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        info!(%data_file, "data document not found; serving an empty collection until first PUT");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_data_parent_directory() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("city_env_{}", uuid::Uuid::new_v4()));
        let data_file = root.join("nested").join("data.json");
        ensure_env("does-not-exist", &data_file.to_string_lossy()).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
