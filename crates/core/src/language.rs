//! Language tags — the closed set of languages the assistant replies in.
//!
//! Produced transiently per request by the language detector; never
//! persisted. The two Chinese variants are distinct tags because the reply
//! directive differs between them.

use serde::{Deserialize, Serialize};

/// One of the eight languages the assistant can be addressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageTag {
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "de")]
    De,
}

impl LanguageTag {
    /// All tags, Chinese variants first — detector scan order depends on it.
    pub const ALL: [LanguageTag; 8] = [
        LanguageTag::ZhTw,
        LanguageTag::ZhCn,
        LanguageTag::En,
        LanguageTag::Ja,
        LanguageTag::Ko,
        LanguageTag::Es,
        LanguageTag::Fr,
        LanguageTag::De,
    ];

    /// The wire code, e.g. `zh-TW` or `en`.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageTag::ZhTw => "zh-TW",
            LanguageTag::ZhCn => "zh-CN",
            LanguageTag::En => "en",
            LanguageTag::Ja => "ja",
            LanguageTag::Ko => "ko",
            LanguageTag::Es => "es",
            LanguageTag::Fr => "fr",
            LanguageTag::De => "de",
        }
    }

    /// Parse an exact wire code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.code().eq_ignore_ascii_case(code))
    }

    /// Whether this tag is one of the Chinese variants.
    pub fn is_chinese(&self) -> bool {
        matches!(self, LanguageTag::ZhTw | LanguageTag::ZhCn)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
