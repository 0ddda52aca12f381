//! Extraction pipeline orchestrating the engine round trip.

use std::time::Instant;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use bonex_engine::TextGenerator;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::ReceiptExtraction;

use super::{
    category::resolve_category, dates::normalize_date, fuse::fuse_text_blocks,
    payload::decode_payload, prompt::build_instruction, schema::validate_payload, Result,
};

/// Finalized result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// Fully validated receipt.
    pub receipt: ReceiptExtraction,

    /// Fused text the engine was shown.
    pub fused_text: String,

    /// Raw engine reply, kept for inspection.
    pub raw_response: String,

    /// Wall-clock pipeline time in milliseconds.
    pub processing_time_ms: u64,
}

/// Receipt extraction pipeline.
///
/// Fuses recognized text blocks, queries the injected engine once, and
/// normalizes the reply into a [`ReceiptExtraction`]. Any stage failure
/// aborts the run; no partial receipt is ever produced.
pub struct ReceiptPipeline<G: TextGenerator> {
    generator: G,
    language: String,
}

impl<G: TextGenerator> ReceiptPipeline<G> {
    /// Create a pipeline around an engine handle.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            language: ExtractionConfig::default().language,
        }
    }

    /// Set the receipt language named in the engine instruction.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Extract one receipt from its ordered text blocks.
    ///
    /// Empty input is not rejected here: a blank fused text still goes
    /// to the engine, which may answer in a shape a later stage refuses.
    pub async fn extract<S: AsRef<str>>(&self, blocks: &[S]) -> Result<ExtractionOutcome> {
        let start = Instant::now();

        let fused_text = fuse_text_blocks(blocks);
        debug!(
            "Fused {} text blocks into {} characters",
            blocks.len(),
            fused_text.chars().count()
        );

        let instruction = build_instruction(&self.language, Local::now().date_naive());
        let prompt = format!("{instruction}\n\nReceipt text:\n{fused_text}");

        debug!("Querying {} for receipt fields", self.generator.model_name());
        let raw_response = self.generator.generate(&prompt).await?;

        let payload = decode_payload(&raw_response)?;
        let validated = validate_payload(&payload)?;
        let date = normalize_date(&validated.date_raw)?;
        let category = resolve_category(validated.products.iter().map(|p| p.category));

        let receipt = ReceiptExtraction {
            store_name: validated.store_name,
            total_amount: validated.total_amount,
            date,
            category,
            products: validated.products,
        };

        let outcome = ExtractionOutcome {
            receipt,
            fused_text,
            raw_response,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} products in {}ms",
            outcome.receipt.products.len(),
            outcome.processing_time_ms
        );

        Ok(outcome)
    }
}
