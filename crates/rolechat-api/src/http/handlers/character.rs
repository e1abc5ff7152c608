//! Character creation handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use rolechat_types::character::CharacterProfile;

use crate::http::error::AppError;
use crate::http::extractors::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /createCharacter - Create a character (or re-render its persona)
/// for the authenticated user.
pub async fn create_character(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
    Json(profile): Json<CharacterProfile>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if profile.name.trim().is_empty() {
        return Err(AppError::Validation(
            "character name must not be empty".to_string(),
        ));
    }

    state
        .chat_service
        .create_or_update_character(&username, &profile)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "character": profile.name }),
        request_id,
        elapsed,
    )))
}
