//! Grounded response generation.
//!
//! Reads the knowledge snapshot current at call time, builds the prompt and
//! asks the model for a reply. Generation failures never propagate out of
//! this layer: the caller always gets a string, at worst a localized
//! apology.

use crate::prompt::build_prompt;
use ironbrief_core::generate::TextGenerator;
use ironbrief_core::language::LanguageTag;
use ironbrief_knowledge::KnowledgeStore;
use std::sync::Arc;
use tracing::error;

const RESPOND_MAX_TOKENS: u32 = 500;

const APOLOGY_ZH: &str = "抱歉,系統暫時無法回應,請稍後再試。";
const APOLOGY_EN: &str = "Sorry, I can't respond right now. Please try again later.";

/// The fixed fallback reply for `lang`.
pub fn apology(lang: LanguageTag) -> &'static str {
    if lang.is_chinese() { APOLOGY_ZH } else { APOLOGY_EN }
}

pub struct ResponseGenerator {
    generator: Arc<dyn TextGenerator>,
    store: Arc<KnowledgeStore>,
}

impl ResponseGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<KnowledgeStore>) -> Self {
        Self { generator, store }
    }

    /// Generate a grounded reply to `text` in `lang`.
    pub async fn respond(&self, text: &str, lang: LanguageTag) -> String {
        let snapshot = self.store.snapshot();
        let prompt = build_prompt(text, lang, &snapshot);

        match self.generator.generate(&prompt, RESPOND_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, lang = %lang, "Generation failed, sending apology");
                apology(lang).to_string()
            }
        }
    }
}
