//! Ollama generate client.
//!
//! One blocking request per call against `POST {endpoint}/api/generate`,
//! non-streaming, with fixed sampling parameters. There is no retry logic
//! anywhere in this client: a failed call propagates to the caller, which
//! owns the fallback behavior.

use async_trait::async_trait;
use ironbrief_core::error::InferenceError;
use ironbrief_core::generate::TextGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed sampling parameters — deterministic apart from these.
const TEMPERATURE: f32 = 0.3;
const TOP_P: f32 = 0.9;

/// A client for a local Ollama-style inference endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client against `base_url` (e.g. `http://127.0.0.1:11434`).
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,

    /// Secondary field some reasoning models populate instead of `response`.
    #[serde(default)]
    thinking: Option<String>,
}

/// Pick the generated text out of a response body.
///
/// Falls back to the `thinking` field when `response` is absent or blank.
fn extract_text(body: GenerateResponse) -> String {
    let primary = body.response.unwrap_or_default();
    let text = if primary.trim().is_empty() {
        body.thinking.unwrap_or_default()
    } else {
        primary
    };
    text.trim().to_string()
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.base_url);

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                num_predict: max_tokens,
                top_p: TOP_P,
            },
        };

        debug!(model = %self.model, max_tokens, prompt_len = prompt.len(), "Sending generate request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Inference endpoint returned error");
            return Err(InferenceError::Status {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: GenerateResponse =
            response.json().await.map_err(|e| InferenceError::Status {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(extract_text(api_response))
    }
}
