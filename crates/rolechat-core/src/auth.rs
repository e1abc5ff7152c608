//! TokenVerifier trait definition.
//!
//! The chat core never inspects token internals: given an opaque bearer
//! token it gets back a stable username or `AuthError::InvalidToken`.
//! The HMAC-signed implementation lives in `rolechat-infra`.

use rolechat_types::error::AuthError;

/// Capability that resolves an opaque token to a username.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}
