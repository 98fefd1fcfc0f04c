//! Flat-file store
//!
//! The collection lives in a single file as a pretty-printed JSON array.
//! Saves write a uniquely named temp file next to the target, fsync it,
//! and rename it into place, so a concurrent `load` sees either the old
//! or the new collection and never a partial write.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::ItemStore;
use crate::items::{Collection, Item};

/// JSON array file backing store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "items".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }

    async fn write_temp(&self, temp: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(temp).await?;
        file.write_all(contents).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl ItemStore for FileStore {
    async fn load(&self) -> Collection {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "data file absent, starting empty");
                return Collection::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "data file unreadable, treating as empty");
                return Collection::new();
            }
        };

        match serde_json::from_str::<Vec<Item>>(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "data file invalid, treating as empty");
                Collection::new()
            }
        }
    }

    async fn save(&self, items: &[Item]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::write_failed(parent, e))?;
        }

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, json.as_bytes()).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::write_failed(&temp, e));
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::write_failed(&self.path, e));
        }

        tracing::trace!(path = %self.path.display(), count = items.len(), "collection saved");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
