//! Error types for the engine layer.

use thiserror::Error;

/// Errors that can occur when calling a text-generation service.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No API key available for the configured backend.
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    /// The HTTP request itself failed (connect error, timeout, bad body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered but its payload could not be decoded.
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),

    /// The service produced no generated text at all.
    #[error("service returned no generated text")]
    EmptyResponse,
}
