//! Provider adapter — the seam to the remote generative-AI service.
//!
//! The orchestrator only sees [`ChatProvider`]; tests substitute a stub,
//! deployments use [`gemini::GeminiProvider`].

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::Message;

/// Deployment-fixed sampling options for the remote call. Not
/// user-controllable per request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    /// Caps the reply length, in provider tokens.
    pub max_output_tokens: u32,
    /// Sampling randomness; 0.0 is near-deterministic.
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Failures from the remote generation call. The orchestrator treats all
/// variants identically; the split exists for logs and tests.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider API key is not configured")]
    MissingApiKey,

    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Provider response was malformed: {0}")]
    MalformedResponse(String),
}

/// A single blocking round-trip to the remote model: prior turns as context,
/// the new message as the turn to answer. No streaming.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn generate(
        &self,
        persona: &str,
        history: &[Message],
        message: &str,
        options: GenerationOptions,
    ) -> Result<String, ProviderError>;
}
