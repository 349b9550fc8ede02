//! Backend-neutral request and response types.

use async_trait::async_trait;
use serde_json::Value;
use trackr_core::{AgentError, Message, ToolCall, ToolSchema};

/// Token usage and timing metrics from one generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Everything sent to the model in one exchange.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub history: Vec<Message>,
    pub input: String,
    pub tools: Vec<ToolSchema>,
}

impl GenerationRequest {
    /// Creates a single-shot request with no history and no tools.
    pub fn new(system_instruction: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
            input: input.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSchema>) -> Self {
        self.tools = tools;
        self
    }
}

/// A decoded model response.
///
/// `raw` is the service's response body as received. Text and calls are
/// taken from the first candidate.
#[derive(Debug, Clone)]
pub struct Generation {
    pub raw: Value,
    pub text_parts: Vec<String>,
    pub calls: Vec<ToolCall>,
    pub block_reason: Option<String>,
    pub metrics: LlmMetrics,
}

impl Generation {
    /// Requested function calls, in the order the model gave them.
    pub fn function_calls(&self) -> Result<Vec<ToolCall>, AgentError> {
        self.check_blocked()?;
        Ok(self.calls.clone())
    }

    /// Concatenated text of the response.
    pub fn text(&self) -> Result<String, AgentError> {
        self.check_blocked()?;
        Ok(self.text_parts.concat())
    }

    fn check_blocked(&self) -> Result<(), AgentError> {
        match &self.block_reason {
            Some(reason) => Err(AgentError::Blocked(reason.clone())),
            None => Ok(()),
        }
    }
}

/// A generation backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Submits one exchange and waits for the complete response.
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, AgentError>;
}
