//! Error taxonomy for Rolechat.
//!
//! One enum per concern. `ChatError` is what the chat service surfaces to
//! callers; the API layer maps it onto HTTP status codes (not-found →
//! 404, validation → 400, everything else → 500).

use thiserror::Error;

/// Errors from chat-store persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted state exists but cannot be deserialized. Never treated
    /// as an empty store; the request must fail.
    #[error("chat store is corrupt: {0}")]
    Corrupt(String),

    #[error("chat store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the completion capability.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("malformed completion response: {0}")]
    Malformed(String),

    #[error("completion refused: {0}")]
    Refused(String),
}

/// Errors surfaced by chat operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("no chat history found for '{0}'")]
    CharacterNotFound(String),

    #[error("message not found")]
    MessageNotFound,

    #[error("invalid request payload: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Post-processing of the completion reply yielded nothing usable.
    #[error("no valid content returned by completion")]
    EmptyReply,
}

impl ChatError {
    /// Whether this error should map to a client-facing "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ChatError::UserNotFound(_)
                | ChatError::CharacterNotFound(_)
                | ChatError::MessageNotFound
        )
    }
}

/// Errors from the account (credential) store.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account store error: {0}")]
    Store(String),
}

/// Errors from token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
}
