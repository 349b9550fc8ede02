//! Chat dispatch handler.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::dto::{ChatBody, ChatReply};
use crate::error::AppError;
use crate::handlers::preview;
use crate::services;
use crate::ServerState;

/// Forwards a conversation to the model and relays its text or function calls.
pub async fn chat(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(ChatBody { message: req }) = body?;

    info!(
        "Chat request (model: {}, {} prior turns): {}...",
        state.model.model_name(),
        req.history.len(),
        preview(&req.message)
    );

    let reply = services::chat::dispatch(&state, req.history, req.message).await?;
    Ok(Json(reply))
}
