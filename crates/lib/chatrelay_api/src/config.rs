//! API server configuration.

use chatrelay_core::provider::GenerationOptions;
use chatrelay_core::provider::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Persona used when no per-key persona is bound and none is configured.
pub const DEFAULT_PERSONA: &str = "You are Chatrelay, a helpful and friendly \
assistant. You help users with their questions about products, services, and \
general inquiries. Keep responses concise, professional, and easy to \
understand.";

/// Default conversation-log cap, in messages (user and model entries count
/// separately).
pub const DEFAULT_MAX_HISTORY: usize = 40;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Remote provider API key; `None` means warn at startup and fail each
    /// generation.
    pub api_key: Option<String>,
    /// Provider base URL (overridable for tests and proxies).
    pub base_url: String,
    /// Provider model name.
    pub model: String,
    /// Deployment-default system instruction.
    pub persona: String,
    /// Conversation-log cap applied after every completed exchange.
    pub max_history: usize,
    /// Sampling options for the remote call.
    pub generation: GenerationOptions,
    /// Whether chat routes require a registered `x-api-key`.
    pub require_api_key: bool,
    /// Keys pre-seeded into the registry at startup, each with an optional
    /// bound persona that overrides the deployment default.
    pub seed_keys: Vec<(String, Option<String>)>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable               | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `BIND_ADDR`            | `127.0.0.1:3000`                              |
    /// | `GEMINI_API_KEY`       | unset (generation fails until provided)       |
    /// | `GEMINI_BASE_URL`      | `https://generativelanguage.googleapis.com`   |
    /// | `GEMINI_MODEL`         | `gemini-2.5-flash`                            |
    /// | `SYSTEM_PROMPT`        | built-in assistant persona                    |
    /// | `MAX_HISTORY_MESSAGES` | `40`                                          |
    /// | `MAX_OUTPUT_TOKENS`    | `500`                                         |
    /// | `TEMPERATURE`          | `0.7`                                         |
    /// | `REQUIRE_API_KEY`      | `false`                                       |
    /// | `API_KEYS`             | empty (comma-separated `key` or `key:persona`) |
    pub fn from_env() -> Self {
        let defaults = GenerationOptions::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            persona: std::env::var("SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_PERSONA.into()),
            max_history: env_parse("MAX_HISTORY_MESSAGES", DEFAULT_MAX_HISTORY),
            generation: GenerationOptions {
                max_output_tokens: env_parse("MAX_OUTPUT_TOKENS", defaults.max_output_tokens),
                temperature: env_parse("TEMPERATURE", defaults.temperature),
            },
            require_api_key: env_parse("REQUIRE_API_KEY", false),
            seed_keys: std::env::var("API_KEYS")
                .map(|v| parse_seed_keys(&v))
                .unwrap_or_default(),
        }
    }
}

/// Parses the `API_KEYS` value: comma-separated entries, each either a bare
/// key or `key:persona` binding a system prompt to that key.
fn parse_seed_keys(value: &str) -> Vec<(String, Option<String>)> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((key, persona)) if !persona.trim().is_empty() => {
                (key.trim().to_string(), Some(persona.trim().to_string()))
            }
            Some((key, _)) => (key.trim().to_string(), None),
            None => (entry.to_string(), None),
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Parses an env var, falling back to `default` when unset or unparseable.
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
