//! ChatStoreRepository trait definition.
//!
//! The whole collection is loaded and rewritten wholesale on every
//! mutation; there is no incremental append. Implementations live in
//! `rolechat-infra` (e.g. `JsonFileChatStore`). Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use rolechat_types::chat::ChatCollection;
use rolechat_types::error::StoreError;

/// Repository trait for the persisted chat collection.
pub trait ChatStoreRepository: Send + Sync {
    /// Read and deserialize persisted state.
    ///
    /// Returns an empty collection when no persisted state exists.
    /// Malformed persisted state is `StoreError::Corrupt`, never an
    /// empty collection.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<ChatCollection, StoreError>> + Send;

    /// Serialize and overwrite persisted state atomically.
    ///
    /// Concurrent readers must never observe a half-written document
    /// (temp file + rename in the filesystem implementation).
    fn save(
        &self,
        collection: &ChatCollection,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
