//! Error types for the bonex-core library.

use thiserror::Error;

/// Main error type for the bonex library.
#[derive(Error, Debug)]
pub enum BonexError {
    /// Engine failure outside a pipeline attempt.
    #[error("engine error: {0}")]
    Engine(#[from] bonex_engine::EngineError),

    /// Extraction attempt failure.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reasons an extraction attempt aborts.
///
/// One attempt ends in either a fully validated record or exactly one of
/// these; nothing is retried and no partial record escapes.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The engine call failed, timed out, or returned no text.
    #[error("extraction engine unavailable: {0}")]
    EngineUnavailable(#[from] bonex_engine::EngineError),

    /// The response contains no brace-delimited payload.
    #[error("no structured payload found in engine response")]
    NoPayloadFound,

    /// A payload span was found but does not decode as JSON.
    #[error("structured payload is not valid JSON: {0}")]
    MalformedPayload(String),

    /// The decoded payload does not match the receipt schema.
    #[error("schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    /// The engine-reported date is not a DD-MM-YYYY calendar date.
    #[error("unparseable receipt date: {0:?}")]
    UnparseableDate(String),
}

/// Schema violations reported by the payload validator.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A required top-level key is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `products` is present but not a list.
    #[error("products must be a list")]
    InvalidProductsShape,

    /// A product entry lacks one of name, price, category.
    #[error("product {0} is missing a required field")]
    InvalidProductShape(usize),

    /// A present value could not be converted to its field's type.
    #[error("invalid value for {field}: {value}")]
    InvalidFieldValue { field: String, value: String },
}

/// Result type for the bonex library.
pub type Result<T> = std::result::Result<T, BonexError>;
