//! Health check handler.

use axum::{Json, extract::State};

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /health` — liveness plus a little runtime metadata.
pub async fn health_handler(
    State(state): State<AppState>,
) -> AppResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".into(),
        version: chatrelay_core::version().into(),
        model: state.config.model.clone(),
        sessions: state.sessions.len(),
        valid_keys: state.keys.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
