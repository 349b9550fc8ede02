//! Request-shaping logic behind the HTTP handlers.

pub mod chat;
pub mod insight;
