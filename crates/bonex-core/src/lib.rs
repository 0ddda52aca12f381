//! Core library for Bulgarian receipt extraction.
//!
//! This crate provides:
//! - Fusion of per-image recognized text into one receipt blob
//! - JSON payload recovery from free-form engine responses
//! - Schema validation and date/category normalization
//! - The extraction pipeline tying the stages together
//! - Spend statistics and warranty-expiry helpers over finished records

pub mod error;
pub mod models;
pub mod extract;
pub mod stats;
pub mod warranty;

pub use error::{BonexError, Result, SchemaError};
pub use models::config::{BonexConfig, EngineConfig, ExtractionConfig};
pub use models::receipt::{Category, Product, ReceiptExtraction};
pub use extract::{ExtractError, ExtractionOutcome, ReceiptPipeline};
pub use stats::{CategorySpend, Period, PeriodSpend};

/// Re-export engine types.
pub use bonex_engine::{EngineError, GeminiBackend, TextGenerator};
