//! JSON flat-file chat store.
//!
//! The whole collection lives in one human-readable `chats.json`
//! document, rewritten on every mutation. A missing or empty file is an
//! empty collection; a present-but-malformed file is `StoreError::Corrupt`
//! and must fail the request rather than silently dropping data.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rolechat_core::repository::ChatStoreRepository;
use rolechat_types::chat::ChatCollection;
use rolechat_types::error::StoreError;

use super::atomic_write;

/// Chat-store adapter over a single JSON file.
pub struct JsonFileChatStore {
    path: PathBuf,
}

impl JsonFileChatStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location inside a data directory.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("chats.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChatStoreRepository for JsonFileChatStore {
    async fn load(&self) -> Result<ChatCollection, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ChatCollection::default()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(ChatCollection::default());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn save(&self, collection: &ChatCollection) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(collection)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        atomic_write(&self.path, &json).await?;
        Ok(())
    }
}
