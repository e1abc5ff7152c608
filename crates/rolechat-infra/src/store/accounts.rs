//! JSON flat-file account (credential) store.
//!
//! Independent of the chat store; it shares no invariants with chat data.
//! Passwords are stored as argon2 hashes, never as plaintext. Writers are
//! serialized by an internal lock so concurrent signups cannot lose an
//! account to a stale read of the document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use rolechat_types::error::AccountError;

use super::atomic_write;

/// One stored credential entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAccount {
    pub username: String,
    /// PHC-format argon2 hash string.
    pub password_hash: String,
}

/// Account store over a single `users.json` document.
pub struct JsonFileAccountStore {
    path: PathBuf,
    /// Guards the load-mutate-save cycle in `signup`.
    write_lock: Mutex<()>,
}

impl JsonFileAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Conventional location inside a data directory.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("users.json"))
    }

    async fn load(&self) -> Result<Vec<StoredAccount>, AccountError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AccountError::Store(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| AccountError::Store(e.to_string()))
    }

    async fn save(&self, accounts: &[StoredAccount]) -> Result<(), AccountError> {
        let json = serde_json::to_string_pretty(accounts)
            .map_err(|e| AccountError::Store(e.to_string()))?;
        atomic_write(&self.path, &json)
            .await
            .map_err(|e| AccountError::Store(e.to_string()))
    }

    /// Register a new account. Fails on duplicate username.
    pub async fn signup(&self, username: &str, password: &str) -> Result<(), AccountError> {
        let _guard = self.write_lock.lock().await;

        let mut accounts = self.load().await?;
        if accounts.iter().any(|a| a.username == username) {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AccountError::Store(e.to_string()))?
            .to_string();

        accounts.push(StoredAccount {
            username: username.to_string(),
            password_hash: hash,
        });
        self.save(&accounts).await?;

        info!(username, "account created");
        Ok(())
    }

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are the same error, so the
    /// response does not leak which usernames exist.
    pub async fn verify(&self, username: &str, password: &str) -> Result<(), AccountError> {
        let accounts = self.load().await?;
        let account = accounts
            .iter()
            .find(|a| a.username == username)
            .ok_or(AccountError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| AccountError::Store(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AccountError::InvalidCredentials)
    }

    /// All registered usernames, in signup order.
    pub async fn list_usernames(&self) -> Result<Vec<String>, AccountError> {
        let accounts = self.load().await?;
        Ok(accounts.into_iter().map(|a| a.username).collect())
    }
}
