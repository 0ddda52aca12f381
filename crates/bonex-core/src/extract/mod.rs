//! Receipt extraction module.
//!
//! One extraction attempt fuses the recognized text of a receipt's
//! images, asks the engine for a structured payload, recovers and
//! validates that payload, and normalizes the date and category. Every
//! stage failure aborts the attempt with one [`ExtractError`] reason.

mod category;
mod dates;
mod fuse;
mod patterns;
mod payload;
mod pipeline;
mod prompt;
mod schema;

pub use category::resolve_category;
pub use dates::{normalize_date, RECEIPT_DATE_FORMAT};
pub use fuse::fuse_text_blocks;
pub use payload::decode_payload;
pub use pipeline::{ExtractionOutcome, ReceiptPipeline};
pub use prompt::build_instruction;
pub use schema::{validate_payload, ValidatedPayload};

pub use crate::error::ExtractError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
