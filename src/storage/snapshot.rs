//! Keyed snapshot store backed by the local filesystem.

use std::path::PathBuf;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// On-disk envelope wrapping every snapshot payload.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Read-through/write-through store for stage snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a snapshot key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }

    /// Whether a snapshot exists for the key.
    pub async fn exists(&self, key: &str) -> bool {
        tokio::fs::try_exists(self.path(key)).await.unwrap_or(false)
    }

    /// Write a snapshot, replacing any previous one wholesale.
    ///
    /// The payload is pretty-printed for human inspection and written
    /// atomically (temp file, then rename) so readers never observe a
    /// half-written snapshot.
    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let envelope = Envelope { data: value };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| AppError::cache_write(key, e))?;

        self.write_bytes(key, &bytes)
            .await
            .map_err(|e| AppError::cache_write(key, e))
    }

    /// Read a snapshot back through the concrete stage schema.
    ///
    /// Fails with a `CacheRead` error when the snapshot is absent, and with
    /// a distinct message when the file exists but does not decode (the
    /// remedy is re-running with the cache disabled for that key).
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let path = self.path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::cache_read(key, "snapshot not found"));
            }
            Err(e) => return Err(AppError::cache_read(key, e)),
        };

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::cache_read(key, format!("invalid snapshot: {e}")))?;
        Ok(envelope.data)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await
    }
}
