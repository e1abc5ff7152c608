//! Application error type mapping to HTTP status codes and the envelope
//! format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use rolechat_types::error::{AccountError, AuthError, ChatError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    Account(AccountError),
    Auth(AuthError),
    /// Request payload failed validation before reaching a service.
    Validation(String),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Chat(e) if e.is_not_found() => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Chat(ChatError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Chat(ChatError::EmptyReply) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EMPTY_REPLY")
            }
            AppError::Chat(ChatError::Completion(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "COMPLETION_ERROR")
            }
            AppError::Chat(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            AppError::Account(AccountError::DuplicateUsername(_)) => {
                (StatusCode::CONFLICT, "USERNAME_TAKEN")
            }
            AppError::Account(AccountError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            }
            AppError::Account(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ACCOUNT_STORE_ERROR"),
            AppError::Auth(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Chat(e) => e.to_string(),
            AppError::Account(e) => e.to_string(),
            AppError::Auth(e) => e.to_string(),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": self.message(),
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
