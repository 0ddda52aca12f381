//! Google Gemini backend over the Generative Language HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::{Result, TextGenerator};

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Backend calling the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout: Duration,
    max_output_tokens: u32,
}

impl GeminiBackend {
    /// Create a backend with an explicit API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    /// Create a backend reading the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR)
            .map_err(|_| EngineError::MissingApiKey(GEMINI_API_KEY_VAR))?;
        Self::new(api_key)
    }

    /// Set the model to call.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the generation token cap.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        debug!("Calling {} with {} prompt bytes", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&GenerateRequest::new(prompt, self.max_output_tokens))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        let text = collect_text(body);
        if text.trim().is_empty() {
            return Err(EngineError::EmptyResponse);
        }

        debug!("Received {} response bytes", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            // Temperature zero keeps the structured output as stable as
            // the service allows.
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens,
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn collect_text(body: GenerateResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error details".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
