//! HTTP route handlers for the assistant server.

pub mod chat;
pub mod insight;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// First 50 bytes of `text`, or all of it when that would split a character.
pub(crate) fn preview(text: &str) -> &str {
    text.get(..50).unwrap_or(text)
}
