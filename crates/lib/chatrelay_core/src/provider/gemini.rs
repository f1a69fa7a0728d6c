//! Google Gemini provider.
//!
//! Calls the `generateContent` REST endpoint with the `x-goog-api-key`
//! header. One request per exchange; the conversation history is replayed in
//! the `contents` array with the new message as the final user turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatProvider, GenerationOptions, ProviderError};
use crate::message::{Message, Role};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Explicit cap on the remote round-trip; timeouts surface as
/// [`ProviderError::Request`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: Role,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` client.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiProvider {
    /// `api_key: None` is allowed so the server can start without a key;
    /// every generation then fails with [`ProviderError::MissingApiKey`].
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(
        persona: &'a str,
        history: &'a [Message],
        message: &'a str,
        options: GenerationOptions,
    ) -> GenerateRequest<'a> {
        let mut contents: Vec<Content<'a>> = history
            .iter()
            .map(|m| Content {
                role: m.role,
                parts: vec![Part { text: &m.text }],
            })
            .collect();
        contents.push(Content {
            role: Role::User,
            parts: vec![Part { text: message }],
        });

        GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part { text: persona }],
            },
            contents,
            generation_config: GenerationConfig {
                max_output_tokens: options.max_output_tokens,
                temperature: options.temperature,
            },
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn generate(
        &self,
        persona: &str,
        history: &[Message],
        message: &str,
        options: GenerationOptions,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = Self::build_request(persona, history, message, options);

        debug!(model = %self.model, history_len = history.len(), "calling generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(ProviderError::RemoteStatus { status, body });
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let candidate = data
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("empty candidates array".into()))?;

        let reply: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();

        if reply.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "candidate carried no text parts".into(),
            ));
        }

        Ok(reply)
    }
}
