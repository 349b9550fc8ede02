//! Client abstractions for the generation service.
//!
//! - [`GenerativeModel`] — Trait implemented by every backend
//! - [`GeminiClient`] — Google Gemini `generateContent` over HTTP
//! - [`GenerationRequest`] / [`Generation`] — One exchange with the model
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use trackr_llm::{GeminiClient, GenerationRequest, GenerativeModel};
//!
//! let client = GeminiClient::new(api_key, "gemini-3-flash-preview", Duration::from_secs(120))?;
//! let request = GenerationRequest::new("You are concise.", "What is a budget?");
//! let generation = client.generate(request).await?;
//! println!("{}", generation.text()?);
//! ```
//!
//! # Function Calling
//!
//! ```rust,ignore
//! let request = GenerationRequest::new(system, "What's my balance?")
//!     .with_history(history)
//!     .with_tools(catalog.schemas());
//!
//! let generation = client.generate(request).await?;
//! for call in generation.function_calls()? {
//!     println!("{}({})", call.name, call.args);
//! }
//! ```

mod client;
mod gemini;

pub use client::{Generation, GenerationRequest, GenerativeModel, LlmMetrics};
pub use gemini::{GeminiClient, GEMINI_API_BASE};
pub use trackr_core::{AgentError, Message, MessageRole, ToolCall, ToolSchema};
