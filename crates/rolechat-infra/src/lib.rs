//! Infrastructure adapters for Rolechat.
//!
//! Implements the traits from `rolechat-core` against real backends: the
//! JSON flat-file chat and account stores, the HMAC bearer-token signer,
//! and the HTTP completion client.

pub mod llm;
pub mod store;
pub mod token;

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ROLECHAT_DATA_DIR` environment variable
/// 2. Platform home directory (`~/.rolechat`)
/// 3. `.rolechat` relative to the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ROLECHAT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rolechat");
    }

    PathBuf::from(".rolechat")
}
