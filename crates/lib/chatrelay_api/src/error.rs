//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Provider(m) => {
                error!("provider failure: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "provider_error",
                    m.as_str(),
                )
            }
            AppError::Internal(m) => {
                error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<chatrelay_core::keys::KeyError> for AppError {
    fn from(e: chatrelay_core::keys::KeyError) -> Self {
        match e {
            chatrelay_core::keys::KeyError::Unauthorized => {
                AppError::Unauthorized("Invalid or missing API key".into())
            }
        }
    }
}

impl From<chatrelay_core::provider::ProviderError> for AppError {
    fn from(e: chatrelay_core::provider::ProviderError) -> Self {
        AppError::Provider(e.to_string())
    }
}
