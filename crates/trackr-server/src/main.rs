//! HTTP server entry point.
//!
//! Resolves configuration, builds the Gemini client and tool catalog once,
//! and serves the Axum router.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trackr_config::ServiceConfig;
use trackr_llm::{GeminiClient, GEMINI_API_BASE};
use trackr_server::{router, AssistantProfile, ServerState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = ServiceConfig::load()?;
    let state = Arc::new(init_server_state(&config)?);
    let app = router(state);

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the immutable state shared by every request.
fn init_server_state(config: &ServiceConfig) -> Result<ServerState> {
    let profile = AssistantProfile::financial()?;
    info!("Registered {} tools", profile.catalog.len());
    for name in profile.catalog.tool_names() {
        info!("  - {}", name);
    }

    let mut client = GeminiClient::new(config.api_key.as_str(), config.model.as_str(), config.request_timeout())?;
    if let Some(base) = &config.api_base {
        info!("Using model {} at {}", config.model, base);
        client = client.with_base_url(base.as_str());
    } else {
        info!("Using model {} at {}", config.model, GEMINI_API_BASE);
    }

    Ok(ServerState::new(Arc::new(client), profile))
}
