//! Axum router configuration with middleware.
//!
//! Route names mirror the front-end client's existing calls, so they are
//! flat verbs rather than REST-style resources. Middleware: CORS limited
//! to the configured front-end origin, plus request tracing.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let allow_origin = match state.config.server.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            tracing::warn!(
                origin = %state.config.server.allowed_origin,
                "configured origin is not a valid header value, allowing any"
            );
            AllowOrigin::any()
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", get(handlers::account::list_users))
        .route("/signup", post(handlers::account::signup))
        .route("/login", post(handlers::account::login))
        .route("/createCharacter", post(handlers::character::create_character))
        .route("/chats", post(handlers::chat::get_chats))
        .route("/getChat", get(handlers::chat::get_chat))
        .route("/sendMessage", post(handlers::chat::send_message))
        .route("/deleteMessage", post(handlers::chat::delete_message))
        .route("/editMessage", post(handlers::chat::edit_message))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check, no auth required.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
