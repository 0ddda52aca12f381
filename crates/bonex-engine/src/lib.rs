//! Generative-engine abstraction layer for bonex.
//!
//! This crate provides a unified interface for calling text-generation
//! services that turn raw receipt text into structured output:
//! - `GeminiBackend` over the Google Generative Language HTTP API
//! - any test double implementing [`TextGenerator`]

mod backend;
mod error;

pub use backend::gemini::{GeminiBackend, DEFAULT_GEMINI_MODEL};
pub use backend::TextGenerator;
pub use error::EngineError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
