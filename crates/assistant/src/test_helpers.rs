//! Shared test helpers for pipeline tests.

use async_trait::async_trait;
use ironbrief_core::error::InferenceError;
use ironbrief_core::generate::TextGenerator;
use std::sync::Mutex;

/// A mock generator that returns a sequence of scripted outcomes.
///
/// Each call to `generate` returns the next outcome in the queue. Panics if
/// more calls are made than outcomes provided, so tests also pin down *how
/// many* model calls a path makes.
pub struct ScriptedGenerator {
    outcomes: Mutex<Vec<Result<String, InferenceError>>>,
    prompts: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl ScriptedGenerator {
    pub fn new(outcomes: Vec<Result<String, InferenceError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            prompts: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// A generator that answers every call with the same text.
    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// A generator whose every call fails with a transport error.
    pub fn failing(calls: usize) -> Self {
        Self::new(
            (0..calls)
                .map(|_| Err(InferenceError::Network("scripted failure".into())))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, InferenceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut count = self.call_count.lock().unwrap();
        let outcomes = self.outcomes.lock().unwrap();

        if *count >= outcomes.len() {
            panic!(
                "ScriptedGenerator: no more outcomes (call #{}, have {})",
                *count,
                outcomes.len()
            );
        }

        let outcome = outcomes[*count].clone();
        *count += 1;
        outcome
    }
}
