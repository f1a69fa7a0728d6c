//! # chatrelay_api
//!
//! HTTP API library for Chatrelay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chatrelay_core::keys::KeyRegistry;
use chatrelay_core::provider::ChatProvider;
use chatrelay_core::session::SessionStore;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health, history, register};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory conversation logs, keyed by session id.
    pub sessions: Arc<SessionStore>,
    /// API-key allow-list with per-key personas.
    pub keys: Arc<KeyRegistry>,
    /// Remote generation capability.
    pub provider: Arc<dyn ChatProvider>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Builds state from config, seeding the key registry from
    /// `config.seed_keys`.
    pub fn new(config: ApiConfig, provider: Arc<dyn ChatProvider>) -> Self {
        let keys = KeyRegistry::new();
        for (key, persona) in &config.seed_keys {
            keys.seed(key.clone(), persona.clone());
        }
        Self {
            sessions: Arc::new(SessionStore::new()),
            keys: Arc::new(keys),
            provider,
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// When `config.require_api_key` is set, the chat and clear-history routes
/// sit behind the `x-api-key` middleware; registration and health are always
/// public.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/register", post(register::register_handler))
        .route("/health", get(health::health_handler));

    // Chat routes (gated when the deployment requires an API key)
    let mut chat_routes = Router::new()
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/clear-history", post(history::clear_history_handler));

    if state.config.require_api_key {
        chat_routes = chat_routes.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::api_key::require_api_key,
        ));
    }

    Router::new()
        .merge(public)
        .merge(chat_routes)
        .layer(cors)
        .with_state(state)
}
