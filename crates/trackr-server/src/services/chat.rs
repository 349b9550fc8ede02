//! Chat dispatch service.
//!
//! Sends the conversation under the chat instruction and tool catalog, then
//! reduces the model's answer to a [`ChatReply`]. Function calls take
//! precedence over any text that accompanies them; a response with neither
//! is replaced by [`FALLBACK_REPLY`].

use tracing::warn;
use trackr_core::{AgentError, Message};
use trackr_llm::{Generation, GenerationRequest};
use trackr_tools::ToolCatalog;

use crate::dto::ChatReply;
use crate::ServerState;

/// Substituted when the model returns neither calls nor text.
pub const FALLBACK_REPLY: &str =
    "I wasn't able to produce a response to that. Could you rephrase your request?";

/// Runs one chat exchange.
pub async fn dispatch(
    state: &ServerState,
    history: Vec<Message>,
    message: String,
) -> Result<ChatReply, AgentError> {
    let profile = &state.profile;
    let request = GenerationRequest::new(profile.chat_instruction.as_str(), message)
        .with_history(history)
        .with_tools(profile.tools.clone());

    let generation = state.model.generate(request).await?;
    shape_reply(&generation, &profile.catalog)
}

/// Maps a generation to the reply envelope.
pub fn shape_reply(generation: &Generation, catalog: &ToolCatalog) -> Result<ChatReply, AgentError> {
    let calls = generation.function_calls()?;
    if !calls.is_empty() {
        for call in calls.iter().filter(|c| !catalog.has(&c.name)) {
            warn!("Model requested undeclared tool '{}'", call.name);
        }
        return Ok(ChatReply::FunctionCall { calls });
    }

    let content = generation.text()?;
    if content.trim().is_empty() {
        warn!("Empty model response, substituting fallback reply");
        return Ok(ChatReply::Text { content: FALLBACK_REPLY.to_string() });
    }

    Ok(ChatReply::Text { content })
}
