//! Single-transaction insight service.

use serde_json::Value;
use trackr_core::AgentError;
use trackr_llm::GenerationRequest;

use crate::ServerState;

/// Asks the model to analyze `record` and returns the raw response.
pub async fn generate(state: &ServerState, record: &Value) -> Result<Value, AgentError> {
    let input = serde_json::to_string(record)?;
    let request = GenerationRequest::new(state.profile.insight_instruction.as_str(), input);
    let generation = state.model.generate(request).await?;
    Ok(generation.raw)
}
