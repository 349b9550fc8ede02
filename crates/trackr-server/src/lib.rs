//! HTTP layer for the Trackr assistant.
//!
//! Exposes the chat dispatcher (`POST /chat`) and the insight generator
//! (`POST /insight`). All configuration is built once into [`ServerState`]
//! and shared read-only across requests.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use trackr_config::prompts::{CHAT_INSTRUCTION, INSIGHT_INSTRUCTION};
use trackr_core::ToolSchema;
use trackr_llm::GenerativeModel;
use trackr_tools::{financial_catalog, ToolCatalog, ToolError};

/// Fixed instructions and tools sent with every request.
pub struct AssistantProfile {
    pub chat_instruction: String,
    pub insight_instruction: String,
    pub catalog: ToolCatalog,
    /// `catalog` rendered once for the wire.
    pub tools: Vec<ToolSchema>,
}

impl AssistantProfile {
    /// Builds a profile, rendering the catalog's schemas.
    pub fn new(chat_instruction: impl Into<String>, insight_instruction: impl Into<String>, catalog: ToolCatalog) -> Self {
        let tools = catalog.schemas();
        Self {
            chat_instruction: chat_instruction.into(),
            insight_instruction: insight_instruction.into(),
            catalog,
            tools,
        }
    }

    /// The built-in finance assistant profile.
    pub fn financial() -> Result<Self, ToolError> {
        Ok(Self::new(CHAT_INSTRUCTION, INSIGHT_INSTRUCTION, financial_catalog()?))
    }
}

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub model: Arc<dyn GenerativeModel>,
    pub profile: AssistantProfile,
}

impl ServerState {
    pub fn new(model: Arc<dyn GenerativeModel>, profile: AssistantProfile) -> Self {
        Self { model, profile }
    }
}

/// Builds the application router.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/insight", post(handlers::insight::insight))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
