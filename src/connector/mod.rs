//! # Connector Layer
//!
//! External integrations implementing the generation port:
//! - Local chord-generation web service
//! - Chat-completion LLM backend (OpenAI-compatible)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
