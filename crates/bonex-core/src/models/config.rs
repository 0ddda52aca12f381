//! Configuration structures for the extraction pipeline.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BonexError, Result};

/// Main configuration for the bonex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BonexConfig {
    /// Generative-engine configuration.
    pub engine: EngineConfig,

    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for BonexConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Generative-engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model to call.
    pub model: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Generation token cap.
    pub max_output_tokens: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: bonex_engine::DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: 30,
            max_output_tokens: 2048,
        }
    }
}

impl EngineConfig {
    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Extraction pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Language the receipts are printed in, passed to the engine as a
    /// hint alongside the recognized text.
    pub language: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            language: "Bulgarian".to_string(),
        }
    }
}

impl BonexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| BonexError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| BonexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
