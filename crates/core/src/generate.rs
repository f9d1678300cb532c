//! TextGenerator trait — the abstraction over the inference backend.
//!
//! A TextGenerator takes a fully assembled prompt and a token budget and
//! returns generated text. The production implementation (`ironbrief-inference`)
//! talks to a local Ollama-style endpoint; tests use scripted mocks.
//!
//! The contract is deliberately one-shot: a single attempt, no retry, no
//! internal timeout beyond what the implementation's transport enforces.
//! Every caller has a defined fallback when this fails.

use crate::error::InferenceError;
use async_trait::async_trait;

/// The inference seam.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// A human-readable name for this backend (e.g., "ollama").
    fn name(&self) -> &str;

    /// Generate text for `prompt`, producing at most `max_tokens` tokens.
    ///
    /// Returns the generated text with surrounding whitespace trimmed.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, InferenceError>;
}
