//! Clear-history request handler.

use axum::{Json, extract::State};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ClearHistoryRequest, ClearHistoryResponse};
use crate::services::chat;

/// `POST /api/clear-history` — drop one session's conversation log.
pub async fn clear_history_handler(
    State(state): State<AppState>,
    body: Option<Json<ClearHistoryRequest>>,
) -> AppResult<Json<ClearHistoryResponse>> {
    let session_id = body.and_then(|Json(b)| b.session_id);
    chat::clear_history(&state, session_id);
    Ok(Json(ClearHistoryResponse {
        message: "Conversation history cleared".into(),
    }))
}
