//! Transaction insight handler.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::dto::{InsightBody, InsightResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Generates a narrative analysis of one transaction record.
pub async fn insight(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<InsightBody>, JsonRejection>,
) -> Result<Json<InsightResponse>, AppError> {
    let Json(InsightBody { object }) = body?;

    info!("Insight request (model: {})", state.model.model_name());

    let res = services::insight::generate(&state, &object).await?;
    Ok(Json(InsightResponse { res }))
}
