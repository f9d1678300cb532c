//! # IronBrief Core
//!
//! Domain types, traits, and error definitions for the IronBrief assistant
//! pipeline. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The inference backend is defined as a trait here; the HTTP client lives in
//! `ironbrief-inference` and tests substitute scripted mocks. The same goes
//! for the knowledge snapshot: the value types live here, the store that owns
//! and refreshes them lives in `ironbrief-knowledge`. All crates depend
//! inward on core.

pub mod error;
pub mod generate;
pub mod knowledge;
pub mod language;

// Re-export key types at crate root for ergonomics
pub use error::{InferenceError, KnowledgeError};
pub use generate::TextGenerator;
pub use knowledge::{KnowledgeSnapshot, Section};
pub use language::LanguageTag;
