//! The IronBrief assistant pipeline.
//!
//! Three components over one inference seam:
//!
//! 1. **LanguageDetector** — which language to answer in
//! 2. **IntentClassifier** — is this a knowledge-update request?
//! 3. **ResponseGenerator** — grounded answer from the knowledge snapshot
//!
//! The transport layer calls them in that order and branches between an
//! acknowledgment (update intent) and a generated reply. Every component
//! degrades instead of failing: the detector falls back to a script
//! heuristic, the classifier fails open, the generator apologizes.

pub mod detector;
pub mod intent;
pub mod prompt;
pub mod responder;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use detector::LanguageDetector;
pub use intent::IntentClassifier;
pub use responder::ResponseGenerator;

use ironbrief_core::generate::TextGenerator;
use ironbrief_core::language::LanguageTag;
use ironbrief_knowledge::KnowledgeStore;
use std::sync::Arc;

/// The full pipeline bundled behind one handle.
///
/// Cheap to share: clones of the `Arc`s, no per-request state.
pub struct Assistant {
    detector: LanguageDetector,
    classifier: IntentClassifier,
    responder: ResponseGenerator,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<KnowledgeStore>) -> Self {
        Self {
            detector: LanguageDetector::new(Arc::clone(&generator)),
            classifier: IntentClassifier::new(Arc::clone(&generator)),
            responder: ResponseGenerator::new(generator, store),
        }
    }

    /// Which of the supported languages `text` is written in.
    pub async fn detect_language(&self, text: &str) -> LanguageTag {
        self.detector.detect(text).await
    }

    /// Whether `text` asks to update/record/remember information.
    pub async fn is_knowledge_update(&self, text: &str) -> bool {
        self.classifier.is_knowledge_update(text).await
    }

    /// A grounded reply to `text` in `lang`.
    pub async fn respond(&self, text: &str, lang: LanguageTag) -> String {
        self.responder.respond(text, lang).await
    }
}
