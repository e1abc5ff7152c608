//! Chat handlers: transcript reads, the send pipeline, message mutations.
//!
//! All of these act on the authenticated user's record; the username is
//! never taken from the body.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use rolechat_types::chat::{CharacterTranscript, ChatMessage, UserChatRecord};

use crate::http::error::AppError;
use crate::http::extractors::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetChatQuery {
    pub character_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub character_name: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMessageBody {
    pub character_name: String,
    /// Full message to match on; every matching entry is removed.
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct EditMessageBody {
    pub character_name: String,
    /// Full message to match on; only the first match is edited.
    pub old_message: ChatMessage,
    pub new_content: String,
}

/// POST /chats - The caller's whole chat record, all characters included.
pub async fn get_chats(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
) -> Result<Json<ApiResponse<UserChatRecord>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let record = state.chat_service.get_user_record(&username).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(record, request_id, elapsed)))
}

/// GET /getChat?character_name= - One character's transcript.
pub async fn get_chat(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
    Query(query): Query<GetChatQuery>,
) -> Result<Json<ApiResponse<CharacterTranscript>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let transcript = state
        .chat_service
        .get_transcript(&username, &query.character_name)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(transcript, request_id, elapsed)))
}

/// POST /sendMessage - Run the send pipeline and return the reply text.
pub async fn send_message(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let reply = state
        .chat_service
        .send_message(&username, &body.character_name, &body.message)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "reply": reply }),
        request_id,
        elapsed,
    )))
}

/// POST /deleteMessage - Remove every message matching role and content.
pub async fn delete_message(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
    Json(body): Json<DeleteMessageBody>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let removed = state
        .chat_service
        .delete_message(&username, &body.character_name, &body.message)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "removed": removed }),
        request_id,
        elapsed,
    )))
}

/// POST /editMessage - Rewrite the first message matching role and content.
pub async fn edit_message(
    State(state): State<AppState>,
    Authenticated(username): Authenticated,
    Json(body): Json<EditMessageBody>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if body.new_content.trim().is_empty() {
        return Err(AppError::Validation(
            "new content must not be empty".to_string(),
        ));
    }

    state
        .chat_service
        .edit_message(
            &username,
            &body.character_name,
            &body.old_message,
            &body.new_content,
        )
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        json!({ "edited": true }),
        request_id,
        elapsed,
    )))
}
