//! Google Gemini `generateContent` client with function-calling support.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use trackr_core::{AgentError, Message, MessageRole, ToolCall, ToolSchema};

use crate::client::{Generation, GenerationRequest, GenerativeModel, LlmMetrics};

/// Public Gemini endpoint.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "LANGUAGE",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

// === Request body ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: RequestContent,
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Serialize)]
struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

// === Response body ===

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    function_call: Option<ToolCall>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

fn role_name(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

fn text_content(role: Option<&'static str>, text: &str) -> RequestContent {
    RequestContent {
        role,
        parts: vec![TextPart { text: text.to_string() }],
    }
}

/// Turns without text are dropped: Gemini rejects empty text parts.
fn map_contents(history: &[Message], input: &str) -> Vec<RequestContent> {
    history
        .iter()
        .filter(|msg| !msg.content.trim().is_empty())
        .map(|msg| text_content(Some(role_name(msg.role)), &msg.content))
        .chain(std::iter::once(text_content(Some("user"), input)))
        .collect()
}

fn map_tools(tools: &[ToolSchema]) -> Vec<GeminiTool> {
    if tools.is_empty() {
        return Vec::new();
    }
    vec![GeminiTool {
        function_declarations: tools
            .iter()
            .map(|t| FunctionDeclaration {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.parameters.clone(),
            })
            .collect(),
    }]
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: text_content(None, &request.system_instruction),
        contents: map_contents(&request.history, &request.input),
        tools: map_tools(&request.tools),
    }
}

/// Decodes a response body, keeping the raw JSON alongside.
fn decode(raw: Value, elapsed_ms: u64) -> Result<Generation, AgentError> {
    let resp: GenerateContentResponse = serde_json::from_value(raw.clone())?;

    let (input_tokens, output_tokens) = resp
        .usage_metadata
        .map(|u| (u.prompt_token_count.unwrap_or(0), u.candidates_token_count.unwrap_or(0)))
        .unwrap_or((0, 0));

    let prompt_block = resp.prompt_feedback.and_then(|f| f.block_reason);
    let first = resp.candidates.into_iter().next();
    let finish_block = first
        .as_ref()
        .and_then(|c| c.finish_reason.as_deref())
        .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
        .map(String::from);

    let mut text_parts = Vec::new();
    let mut calls = Vec::new();
    for part in first.and_then(|c| c.content).map(|c| c.parts).unwrap_or_default() {
        if let Some(call) = part.function_call {
            calls.push(call);
        }
        match part.text {
            Some(text) if !part.thought => text_parts.push(text),
            _ => {}
        }
    }

    Ok(Generation {
        raw,
        text_parts,
        calls,
        block_reason: prompt_block.or(finish_block),
        metrics: LlmMetrics { input_tokens, output_tokens, elapsed_ms },
    })
}

fn transport_err(e: reqwest::Error) -> AgentError {
    if e.is_timeout() {
        AgentError::Timeout
    } else {
        AgentError::LlmError(e.to_string())
    }
}

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client whose requests are cut off after `timeout`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))?;
        let model = model.into();
        info!("GeminiClient: model={}, timeout={}s", model, timeout.as_secs());
        Ok(Self {
            client,
            base_url: GEMINI_API_BASE.to_string(),
            api_key: api_key.into(),
            model,
        })
    }

    /// Points the client at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generate_url(&self) -> String {
        let model = self.model.trim();
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.strip_prefix("models/").unwrap_or(model)
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, AgentError> {
        let start = Instant::now();
        let body = build_request(&request);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_err)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status { status, body });
        }

        let raw: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                AgentError::ParseError(e.to_string())
            } else {
                transport_err(e)
            }
        })?;
        debug!("Gemini raw response: {}", raw);

        let generation = decode(raw, start.elapsed().as_millis() as u64)?;
        info!(
            "Gemini: {}ms, tokens: {}/{}, tool_calls: {}, blocked: {}",
            generation.metrics.elapsed_ms,
            generation.metrics.input_tokens,
            generation.metrics.output_tokens,
            generation.calls.len(),
            generation.block_reason.as_deref().unwrap_or("no")
        );
        Ok(generation)
    }
}
