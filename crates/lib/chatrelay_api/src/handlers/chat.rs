//! Chat request handler.

use axum::{Extension, Json, extract::State};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::api_key::KeyPersona;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::chat;

/// `POST /api/chat` — send a chat message, get the model's reply.
///
/// The [`KeyPersona`] extension is present only when the deployment gates
/// this route behind the API-key middleware.
pub async fn chat_handler(
    State(state): State<AppState>,
    key_persona: Option<Extension<KeyPersona>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let persona = key_persona.and_then(|Extension(KeyPersona(p))| p);
    let response = chat::run_exchange(&state, persona, body).await?;
    Ok(Json(response))
}
