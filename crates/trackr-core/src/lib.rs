//! Core domain types and error definitions for the Trackr assistant.
//!
//! This crate provides the types shared across the workspace:
//!
//! - [`AgentError`] — Error type for generation-service calls
//! - [`Message`] and [`MessageRole`] — Conversation turn types
//! - [`ToolCall`] — A function invocation requested by the model
//! - [`ToolSchema`] — A rendered function declaration sent to the model
//!
//! # Example
//!
//! ```rust
//! use trackr_core::{Message, MessageRole};
//!
//! let turn: Message = serde_json::from_str(r#"{"role":"model","parts":[{"text":"Hi"}]}"#).unwrap();
//! assert_eq!(turn.role, MessageRole::Assistant);
//! assert_eq!(turn.content, "Hi");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the generation service.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Transport-level failure reaching the service.
    #[error("LLM request failed: {0}")]
    LlmError(String),

    /// The service answered with a non-success status.
    #[error("LLM API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The request exceeded the configured timeout.
    #[error("LLM request timed out")]
    Timeout,

    /// The prompt or the candidate was blocked by the service.
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// The service response could not be decoded.
    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::ParseError(err.to_string())
    }
}

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant. Gemini calls this role `model`.
    #[serde(alias = "model")]
    Assistant,
}

/// A single turn in a conversation history.
///
/// Deserializes from either `{role, content}` or the Gemini SDK shape
/// `{role, parts: [{text}]}`. Non-text parts such as `functionCall` carry no
/// content, so a turn made only of them decodes with empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireTurn")]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The text content of the message.
    pub content: String,
}

impl Message {
    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    /// Creates a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

#[derive(Deserialize)]
struct WireTurn {
    role: MessageRole,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    parts: Option<Vec<WirePart>>,
}

#[derive(Deserialize)]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
}

impl TryFrom<WireTurn> for Message {
    type Error = String;

    fn try_from(turn: WireTurn) -> Result<Self, Self::Error> {
        let content = match (turn.content, turn.parts) {
            (Some(content), _) => content,
            (None, Some(parts)) if !parts.is_empty() => parts.into_iter().filter_map(|p| p.text).collect(),
            _ => return Err("turn has neither `content` nor `parts`".into()),
        };
        Ok(Self { role: turn.role, content })
    }
}

// ============================================================================
// Tool Types
// ============================================================================

/// A function invocation requested by the model.
///
/// The service never executes these; they are relayed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier, when the service supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of a declared tool.
    pub name: String,
    /// Arguments as a JSON object.
    #[serde(default = "empty_args")]
    pub args: serde_json::Value,
}

fn empty_args() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ToolCall {
    /// Creates a call with no identifier.
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self { id: None, name: name.into(), args }
    }
}

/// A function declaration rendered for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique name of the tool (e.g., "getBalance").
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}
