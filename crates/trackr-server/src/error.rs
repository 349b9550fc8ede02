//! Application error types and Axum response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use trackr_core::AgentError;

/// Message returned to callers for every failure.
pub const GENERIC_FAILURE: &str = "failed to generate content";

/// Request failures. Causes are logged, never returned to the caller.
#[derive(Debug)]
pub enum AppError {
    /// The body could not be parsed into the expected shape.
    InvalidBody(String),
    /// The generation service call failed.
    Upstream(AgentError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError::Upstream(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidBody(msg) => error!("Rejected request body: {}", msg),
            AppError::Upstream(err) => error!("Gemini error: {}", err),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: GENERIC_FAILURE }),
        )
            .into_response()
    }
}
