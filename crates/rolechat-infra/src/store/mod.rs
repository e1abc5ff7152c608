//! Flat-file JSON stores.
//!
//! Both stores rewrite their document wholesale through a temp-file +
//! rename so no reader ever observes a half-written file.

pub mod accounts;
pub mod chats;

use std::path::Path;

/// Write `content` to `path` atomically: write a sibling temp file, then
/// rename it over the target. Rename within one directory is atomic on
/// POSIX filesystems.
///
/// The temp name is fixed per target path, so writers for one path must
/// be serialized: the chat service commit lock covers the chat store, and
/// the account store holds its own write lock.
pub(crate) async fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await
}
