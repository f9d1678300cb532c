//! Knowledge snapshot value types.
//!
//! A `KnowledgeSnapshot` is the full in-memory copy of every knowledge-base
//! section at a point in time. Snapshots are immutable once built: the store
//! replaces the whole snapshot on reload, so a reader holding one always sees
//! a consistent generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed set of knowledge-base sections.
///
/// Every section is always present in a snapshot, even when its backing
/// source is missing (the content is then the empty string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Product,
    Customers,
    Roadmap,
    Priorities,
    Resources,
    PmMemory,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Product,
        Section::Customers,
        Section::Roadmap,
        Section::Priorities,
        Section::Resources,
        Section::PmMemory,
    ];

    /// The section key, doubling as the backing file stem.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Product => "product",
            Section::Customers => "customers",
            Section::Roadmap => "roadmap",
            Section::Priorities => "priorities",
            Section::Resources => "resources",
            Section::PmMemory => "pm_memory",
        }
    }

    /// The backing file name under the knowledge root.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.key())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The full knowledge base at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    sections: BTreeMap<Section, String>,
    pub loaded_at: DateTime<Utc>,
}

impl KnowledgeSnapshot {
    /// The initial snapshot: every section present and empty.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Build a snapshot, filling any absent section with the empty string.
    pub fn new(mut sections: BTreeMap<Section, String>) -> Self {
        for section in Section::ALL {
            sections.entry(section).or_default();
        }
        Self {
            sections,
            loaded_at: Utc::now(),
        }
    }

    /// The full content of a section.
    pub fn get(&self, section: Section) -> &str {
        self.sections
            .get(&section)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The first `max_chars` characters of a section.
    ///
    /// Bounded by characters, not bytes, so multi-byte text is never split.
    pub fn excerpt(&self, section: Section, max_chars: usize) -> &str {
        let content = self.get(section);
        match content.char_indices().nth(max_chars) {
            Some((byte_index, _)) => &content[..byte_index],
            None => content,
        }
    }

    /// Whether every section is empty (nothing has loaded yet).
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(|content| content.is_empty())
    }

    /// Total content length in characters across all sections.
    pub fn total_chars(&self) -> usize {
        self.sections.values().map(|c| c.chars().count()).sum()
    }
}
