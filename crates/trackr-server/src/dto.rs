//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trackr_core::{Message, ToolCall};

// === Chat ===

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: ChatRequest,
}

/// Prior turns plus the new user message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<Message>,
    pub message: String,
}

/// Reply of `POST /chat`: exactly one of calls or text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatReply {
    FunctionCall { calls: Vec<ToolCall> },
    Text { content: String },
}

// === Insight ===

/// Body of `POST /insight`. The record is forwarded as-is.
#[derive(Debug, Deserialize)]
pub struct InsightBody {
    pub object: Value,
}

/// Reply of `POST /insight`, carrying the raw service response.
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub res: Value,
}
