//! Chat orchestrator — one exchange per call.
//!
//! Pipeline: validate → lock session → snapshot history → generate →
//! append user+model pair → trim. The session mutex is held across the
//! provider await so concurrent requests for one session serialize and the
//! log only ever holds completed exchanges, in order.

use chatrelay_core::message::Message;
use chatrelay_core::session::{DEFAULT_SESSION_ID, trim_history};
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};

/// Runs one request through the full pipeline.
///
/// `key_persona` is the persona bound to the presented API key, if any;
/// it overrides the deployment default. On provider failure nothing is
/// appended: the log stays exactly as it was before the request.
pub async fn run_exchange(
    state: &AppState,
    key_persona: Option<String>,
    request: ChatRequest,
) -> AppResult<ChatResponse> {
    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation("Message is required".into()))?
        .to_string();

    let session_id = request
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let persona = key_persona.unwrap_or_else(|| state.config.persona.clone());

    let handle = state.sessions.get_or_create(&session_id);
    let mut log = handle.lock().await;

    // The provider sees the log as it stood before this request's message.
    let history = log.clone();
    debug!(session_id = %session_id, history_len = history.len(), "running exchange");

    let reply = state
        .provider
        .generate(&persona, &history, &message, state.config.generation)
        .await?;

    log.push(Message::user(message));
    log.push(Message::model(reply.clone()));
    trim_history(&mut log, state.config.max_history);

    info!(session_id = %session_id, log_len = log.len(), "exchange completed");

    Ok(ChatResponse {
        reply,
        session_id,
    })
}

/// Drops a session's log. The next message for that id starts fresh.
pub fn clear_history(state: &AppState, session_id: Option<String>) {
    let session_id = session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
    state.sessions.clear(&session_id);
    info!(session_id = %session_id, "conversation history cleared");
}
