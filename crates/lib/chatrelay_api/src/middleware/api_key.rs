//! API-key middleware — `x-api-key` extraction and allow-list validation.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::error::AppError;

/// Persona bound to the presented key, stored in request extensions.
/// `None` means the key is valid but unbound; the orchestrator falls back to
/// the deployment default.
#[derive(Debug, Clone)]
pub struct KeyPersona(pub Option<String>);

/// Axum middleware: extracts `x-api-key`, validates it against the registry,
/// and injects the resolved [`KeyPersona`] into request extensions.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing x-api-key header".into()))?;

    let persona = state.keys.authenticate(key)?;

    request.extensions_mut().insert(KeyPersona(persona));

    Ok(next.run(request).await)
}
