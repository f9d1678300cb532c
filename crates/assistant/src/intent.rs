//! Intent classification — is this message asking us to record something?
//!
//! Two stages, short-circuiting for cost: a cheap recall-oriented rule stage
//! (no model call when nothing matches) and a YES/NO model stage that weeds
//! out rule matches which are really just questions ("what's the progress?"
//! matches the progress rule but is not an update request).
//!
//! The pipeline is biased toward over-detecting updates: a model failure
//! after a rule match counts as YES. A false positive only costs an
//! acknowledgment message — there is no write path behind it.

use ironbrief_core::generate::TextGenerator;
use regex::RegexSet;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

const CONFIRM_MAX_TOKENS: u32 = 8;

/// One pattern per update concept, bilingual, case-insensitive.
static UPDATE_RULES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)remember|記得|记得",
        r"(?i)record|note\s+down|記錄|纪录|记录|紀錄",
        r"(?i)update|更新",
        r"(?i)\badd\b|append|新增|加入|追加",
        r"(?i)contacted|reached\s+out|聯絡|联络|联系",
        r"(?i)status\s+(has\s+)?changed|狀態|状态",
        r"(?i)progress|進度|进度",
        r"(?i)remind|notify|提醒|通知",
        r"(?i)\btodo\b|to-do|待辦|待办",
    ])
    .expect("intent rules are valid regexes")
});

/// Whether any rule-stage pattern matches (no model involved).
pub fn matches_rule(text: &str) -> bool {
    UPDATE_RULES.is_match(text)
}

pub struct IntentClassifier {
    generator: Arc<dyn TextGenerator>,
}

impl IntentClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Whether `text` is a request to update/record/remember information.
    ///
    /// Messages classified independently; no cross-message memory.
    pub async fn is_knowledge_update(&self, text: &str) -> bool {
        if !matches_rule(text) {
            return false;
        }
        debug!("Update rule matched, confirming with model");

        let prompt = confirmation_prompt(text);
        match self.generator.generate(&prompt, CONFIRM_MAX_TOKENS).await {
            Ok(reply) => reply.to_uppercase().contains("YES"),
            Err(e) => {
                // Fail open: the rule stage already matched.
                warn!(error = %e, "Intent model unavailable, keeping rule-stage decision");
                true
            }
        }
    }
}

fn confirmation_prompt(text: &str) -> String {
    format!(
        "Is the following message a request to update, record or remember \
         information? Answer with a single word: YES or NO.\n\n\
         Message: {text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedGenerator;

    #[tokio::test]
    async fn no_keyword_means_no_model_call() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let classifier = IntentClassifier::new(Arc::clone(&generator) as _);

        assert!(!classifier.is_knowledge_update("tell me a story").await);
        assert!(!classifier.is_knowledge_update("天氣如何?").await);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn rule_match_confirmed_by_model() {
        let generator = Arc::new(ScriptedGenerator::replies(&["YES"]));
        let classifier = IntentClassifier::new(Arc::clone(&generator) as _);

        assert!(
            classifier
                .is_knowledge_update("remember to call the customer tomorrow")
                .await
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn rule_match_rejected_by_model() {
        let generator = Arc::new(ScriptedGenerator::replies(&["NO"]));
        let classifier = IntentClassifier::new(Arc::clone(&generator) as _);

        // Matches the progress rule but is a question, and the model says so.
        assert!(!classifier.is_knowledge_update("what's the progress?").await);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn model_failure_fails_open() {
        let generator = Arc::new(ScriptedGenerator::failing(1));
        let classifier = IntentClassifier::new(Arc::clone(&generator) as _);

        assert!(classifier.is_knowledge_update("please update the roadmap").await);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn yes_is_matched_case_insensitively_as_substring() {
        let generator = Arc::new(ScriptedGenerator::replies(&["yes, it is."]));
        let classifier = IntentClassifier::new(Arc::clone(&generator) as _);
        assert!(classifier.is_knowledge_update("add this to the notes").await);
    }

    #[tokio::test]
    async fn chinese_update_request_end_to_end() {
        // 記得 trips the remember rule; the model then has the final say.
        let text = "記得明天要打電話給客戶";

        let saying_no = Arc::new(ScriptedGenerator::replies(&["NO"]));
        let classifier = IntentClassifier::new(Arc::clone(&saying_no) as _);
        assert!(!classifier.is_knowledge_update(text).await);
        assert_eq!(saying_no.call_count(), 1);

        let saying_yes = Arc::new(ScriptedGenerator::replies(&["YES"]));
        let classifier = IntentClassifier::new(Arc::clone(&saying_yes) as _);
        assert!(classifier.is_knowledge_update(text).await);

        let failing = Arc::new(ScriptedGenerator::failing(1));
        let classifier = IntentClassifier::new(Arc::clone(&failing) as _);
        assert!(classifier.is_knowledge_update(text).await);
    }

    #[test]
    fn rule_stage_covers_the_bilingual_concepts() {
        for text in [
            "remember this",
            "记得打电话",
            "update the doc",
            "更新一下狀態",
            "add a note",
            "新增一筆資料",
            "I contacted the vendor",
            "status has changed",
            "any progress on this?",
            "進度如何",
            "remind me later",
            "提醒我開會",
            "todo: ship it",
            "待辦事項",
        ] {
            assert!(matches_rule(text), "expected rule match for {text:?}");
        }

        for text in ["hello there", "what is the weather", "你好嗎"] {
            assert!(!matches_rule(text), "unexpected rule match for {text:?}");
        }
    }
}
