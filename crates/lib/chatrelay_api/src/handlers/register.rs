//! API-key registration handler.

use axum::{Json, extract::State};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::models::RegisterResponse;

/// `POST /api/register` — mint a new API key with no bound persona.
pub async fn register_handler(
    State(state): State<AppState>,
) -> AppResult<Json<RegisterResponse>> {
    let api_key = state.keys.register();
    info!(valid_keys = state.keys.len(), "new API key registered");
    Ok(Json(RegisterResponse {
        message: "New API key generated successfully".into(),
        api_key,
    }))
}
