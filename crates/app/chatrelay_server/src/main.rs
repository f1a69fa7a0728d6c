//! Chatrelay HTTP server binary.

use std::sync::Arc;

use chatrelay_core::provider::gemini::GeminiProvider;
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "chatrelay_server", about = "Chatrelay HTTP server")]
struct Args {
    /// Port to listen on; overrides the port in `BIND_ADDR`.
    #[arg(long)]
    port: Option<u16>,
}

/// Replaces the port of `bind_addr`; a bare hostname keeps its host part.
fn override_port(bind_addr: &str, port: u16) -> String {
    let host = bind_addr
        .rsplit_once(':')
        .map(|(h, _)| h)
        .unwrap_or(bind_addr);
    format!("{host}:{port}")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chatrelay_api=debug,chatrelay_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let mut config = chatrelay_api::config::ApiConfig::from_env();
    if let Some(port) = args.port {
        config.bind_addr = override_port(&config.bind_addr, port);
    }

    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; chat requests will fail until it is provided");
    } else {
        info!("provider API key loaded");
    }

    let provider = Arc::new(GeminiProvider::new(
        config.base_url.clone(),
        config.model.clone(),
        config.api_key.clone(),
    ));

    let state = chatrelay_api::AppState::new(config.clone(), provider);
    let app = chatrelay_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, model = %config.model, "chatrelay listening");
    info!(gated = config.require_api_key, seed_keys = config.seed_keys.len(), "access gate");

    axum::serve(listener, app).await?;

    Ok(())
}
