//! Text-generation backend implementations.

pub mod gemini;

use async_trait::async_trait;

use crate::Result;

/// Trait for text-generation backends.
///
/// This trait abstracts over the service that turns a prompt into
/// free-form text, so the extraction pipeline can run against a remote
/// model in production and a scripted double in tests. One call is one
/// attempt; retry policy belongs to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a free-form text response for the given prompt.
    ///
    /// # Arguments
    /// * `prompt` - Full prompt text, instruction and payload combined
    ///
    /// # Returns
    /// The generated text, which may wrap structured output in prose
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name of the underlying model, for logging and display.
    fn model_name(&self) -> &str;
}
