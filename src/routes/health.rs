use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Registry statistics: live games, tiles in hands, words played
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.registry().get_stats())
}
