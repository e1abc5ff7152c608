//! Account handlers: signup, login, user listing.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One entry in the user listing: `{"username": "ann"}`.
#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub username: String,
}

/// GET /users - All registered users, in signup order.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserEntry>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let users: Vec<UserEntry> = state
        .accounts
        .list_usernames()
        .await?
        .into_iter()
        .map(|username| UserEntry { username })
        .collect();
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(users, request_id, elapsed)))
}

/// POST /signup - Register a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if body.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".to_string()));
    }

    state.accounts.signup(&body.username, &body.password).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "username": body.username }),
        request_id,
        elapsed,
    )))
}

/// POST /login - Verify credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    state.accounts.verify(&body.username, &body.password).await?;
    let token = state.tokens.issue(&body.username);
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "access_token": token, "token_type": "bearer" }),
        request_id,
        elapsed,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_listing_wire_shape() {
        let users = vec![
            UserEntry { username: "ann".to_string() },
            UserEntry { username: "bob".to_string() },
        ];
        let json = serde_json::to_value(&users).unwrap();
        assert_eq!(json[0]["username"], "ann");
        assert_eq!(json[1]["username"], "bob");
    }
}
