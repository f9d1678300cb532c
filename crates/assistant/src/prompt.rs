//! Grounded prompt construction.
//!
//! A pure function from (persona, language directive, bounded knowledge
//! excerpts, user message) to the final prompt string, so tests can compare
//! output directly without a model in the loop.

use ironbrief_core::knowledge::{KnowledgeSnapshot, Section};
use ironbrief_core::language::LanguageTag;

const PERSONA: &str = "You are IronBrief, a product manager's personal assistant. \
You answer questions about the product, its customers, priorities and notes.";

/// Per-section excerpt bounds, in characters.
pub const PRODUCT_EXCERPT_CHARS: usize = 2000;
pub const PRIORITIES_EXCERPT_CHARS: usize = 1500;
pub const CUSTOMERS_EXCERPT_CHARS: usize = 1500;
pub const PM_MEMORY_EXCERPT_CHARS: usize = 1500;

/// The reply-language directive for `lang`.
///
/// Five languages carry their own directive; everything else gets the
/// Traditional-Chinese one.
pub fn language_directive(lang: LanguageTag) -> &'static str {
    match lang {
        LanguageTag::ZhCn => "请使用简体中文回答。",
        LanguageTag::En => "Reply in English.",
        LanguageTag::Ja => "日本語で答えてください。",
        LanguageTag::Ko => "한국어로 답변해 주세요.",
        _ => "請使用繁體中文回答。",
    }
}

/// Build the full generation prompt for `text` in `lang`, grounded in
/// `snapshot`.
pub fn build_prompt(text: &str, lang: LanguageTag, snapshot: &KnowledgeSnapshot) -> String {
    format!(
        "{persona}\n{directive}\n\n\
         # Context\n\n\
         ## Product\n{product}\n\n\
         ## Priorities\n{priorities}\n\n\
         ## Customers\n{customers}\n\n\
         ## Notes\n{pm_memory}\n\n\
         # Question\n{text}\n\n\
         Answer using only the context above. If the context does not \
         contain the answer, say you are not sure.",
        persona = PERSONA,
        directive = language_directive(lang),
        product = snapshot.excerpt(Section::Product, PRODUCT_EXCERPT_CHARS),
        priorities = snapshot.excerpt(Section::Priorities, PRIORITIES_EXCERPT_CHARS),
        customers = snapshot.excerpt(Section::Customers, CUSTOMERS_EXCERPT_CHARS),
        pm_memory = snapshot.excerpt(Section::PmMemory, PM_MEMORY_EXCERPT_CHARS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot_with(section: Section, content: String) -> KnowledgeSnapshot {
        let mut sections = BTreeMap::new();
        sections.insert(section, content);
        KnowledgeSnapshot::new(sections)
    }

    #[test]
    fn every_supported_language_gets_its_directive() {
        let snapshot = KnowledgeSnapshot::empty();
        let cases = [
            (LanguageTag::ZhTw, "請使用繁體中文回答。"),
            (LanguageTag::ZhCn, "请使用简体中文回答。"),
            (LanguageTag::En, "Reply in English."),
            (LanguageTag::Ja, "日本語で答えてください。"),
            (LanguageTag::Ko, "한국어로 답변해 주세요."),
        ];
        for (lang, directive) in cases {
            let prompt = build_prompt("hi", lang, &snapshot);
            assert!(prompt.contains(directive), "missing directive for {lang}");
        }
    }

    #[test]
    fn unlisted_languages_default_to_traditional_chinese() {
        let snapshot = KnowledgeSnapshot::empty();
        for lang in [LanguageTag::Es, LanguageTag::Fr, LanguageTag::De] {
            let prompt = build_prompt("hola", lang, &snapshot);
            assert!(prompt.contains("請使用繁體中文回答。"), "wrong default for {lang}");
        }
    }

    #[test]
    fn product_section_is_cut_at_two_thousand_chars() {
        let snapshot = snapshot_with(Section::Product, "p".repeat(3000));
        let prompt = build_prompt("q", LanguageTag::En, &snapshot);

        let expected: String = "p".repeat(2000);
        assert!(prompt.contains(&format!("## Product\n{expected}\n")));
        assert!(!prompt.contains(&"p".repeat(2001)));
    }

    #[test]
    fn secondary_sections_are_cut_at_fifteen_hundred_chars() {
        for section in [Section::Priorities, Section::Customers, Section::PmMemory] {
            let snapshot = snapshot_with(section, "x".repeat(2200));
            let prompt = build_prompt("q", LanguageTag::En, &snapshot);
            assert!(prompt.contains(&"x".repeat(1500)));
            assert!(!prompt.contains(&"x".repeat(1501)));
        }
    }

    #[test]
    fn roadmap_and_resources_stay_out_of_the_prompt() {
        let mut sections = BTreeMap::new();
        sections.insert(Section::Roadmap, "ROADMAP-MARKER".to_string());
        sections.insert(Section::Resources, "RESOURCES-MARKER".to_string());
        let snapshot = KnowledgeSnapshot::new(sections);

        let prompt = build_prompt("q", LanguageTag::En, &snapshot);
        assert!(!prompt.contains("ROADMAP-MARKER"));
        assert!(!prompt.contains("RESOURCES-MARKER"));
    }

    #[test]
    fn user_message_and_grounding_instruction_are_embedded() {
        let prompt = build_prompt(
            "which customers asked for exports?",
            LanguageTag::En,
            &KnowledgeSnapshot::empty(),
        );
        assert!(prompt.contains("# Question\nwhich customers asked for exports?"));
        assert!(prompt.contains("only the context above"));
    }
}
