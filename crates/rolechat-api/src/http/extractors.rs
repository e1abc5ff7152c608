//! Bearer-token authentication extractor.
//!
//! Extracting `Authenticated` verifies the `Authorization: Bearer <token>`
//! header and yields the username the token was issued for. Handlers never
//! accept a username from the request body; identity always comes from the
//! token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use rolechat_core::auth::TokenVerifier;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request: the username from a verified bearer token.
pub struct Authenticated(pub String);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let username = state.tokens.verify(token)?;
        Ok(Authenticated(username))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth = headers
        .get("authorization")
        .ok_or_else(|| AppError::Auth(rolechat_types::error::AuthError::InvalidToken))?;
    let auth = auth
        .to_str()
        .map_err(|_| AppError::Auth(rolechat_types::error::AuthError::InvalidToken))?;
    auth.strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AppError::Auth(rolechat_types::error::AuthError::InvalidToken))
}
