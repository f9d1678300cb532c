//! Language detection.
//!
//! A model call does the heavy lifting — it is good at telling real
//! languages apart but unreliable at telling the two Chinese script variants
//! apart, so a deterministic character heuristic backs it up: it takes over
//! whenever the model's reply contains no known code, and it alone decides
//! Simplified vs Traditional when no model answer is usable.

use ironbrief_core::generate::TextGenerator;
use ironbrief_core::language::LanguageTag;
use std::sync::Arc;
use tracing::{debug, warn};

const DETECT_MAX_TOKENS: u32 = 16;

/// Characters used only in Simplified Chinese, paired with the
/// Traditional-only set below.
const SIMPLIFIED_ONLY: &[char] = &[
    '记', '录', '这', '说', '对', '时', '们', '会', '发', '问', '题', '务', '户', '产', '优', '级',
    '联', '进', '态', '办', '请', '为', '与', '经',
];

/// Characters used only in Traditional Chinese.
const TRADITIONAL_ONLY: &[char] = &[
    '記', '錄', '這', '說', '對', '時', '們', '會', '發', '問', '題', '務', '戶', '產', '優', '級',
    '聯', '進', '態', '辦', '請', '為', '與', '經',
];

pub struct LanguageDetector {
    generator: Arc<dyn TextGenerator>,
}

impl LanguageDetector {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Detect which supported language `text` is written in.
    ///
    /// Never fails: a model error or an unusable reply falls back to the
    /// script heuristic.
    pub async fn detect(&self, text: &str) -> LanguageTag {
        let prompt = detection_prompt(text);
        match self.generator.generate(&prompt, DETECT_MAX_TOKENS).await {
            Ok(reply) => match scan_reply(&reply) {
                Some(tag) => tag,
                None => {
                    debug!(reply = %reply, "No language code in model reply, using script heuristic");
                    script_fallback(text)
                }
            },
            Err(e) => {
                warn!(error = %e, "Language model unavailable, using script heuristic");
                script_fallback(text)
            }
        }
    }
}

fn detection_prompt(text: &str) -> String {
    format!(
        "Identify the language of the user message below.\n\
         Answer with exactly one code and nothing else: \
         zh-TW, zh-CN, en, ja, ko, es, fr, de.\n\n\
         Message: {text}"
    )
}

/// Find the first known language code in a model reply.
///
/// Substring match over the normalized reply, so extra words around the code
/// are tolerated. The earliest match wins; on a position tie the Chinese
/// variants take precedence (they come first in `LanguageTag::ALL`).
fn scan_reply(reply: &str) -> Option<LanguageTag> {
    let normalized = reply.trim().to_lowercase();
    LanguageTag::ALL
        .into_iter()
        .filter_map(|tag| {
            normalized
                .find(&tag.code().to_lowercase())
                .map(|position| (position, tag))
        })
        .min_by_key(|(position, _)| *position)
        .map(|(_, tag)| tag)
}

/// Deterministic fallback: Han script ⇒ Chinese-variant heuristic, else English.
fn script_fallback(text: &str) -> LanguageTag {
    if text.chars().any(is_han) {
        chinese_variant(text)
    } else {
        LanguageTag::En
    }
}

fn is_han(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF)
}

/// Simplified only when a Simplified-unique character appears and no
/// Traditional-unique one does; Traditional is the tie-break for ambiguous
/// or mixed text.
fn chinese_variant(text: &str) -> LanguageTag {
    let has_simplified = text.chars().any(|c| SIMPLIFIED_ONLY.contains(&c));
    let has_traditional = text.chars().any(|c| TRADITIONAL_ONLY.contains(&c));
    if has_simplified && !has_traditional {
        LanguageTag::ZhCn
    } else {
        LanguageTag::ZhTw
    }
}
