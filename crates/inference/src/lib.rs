//! Inference client for IronBrief.
//!
//! The only implementation talks to a local Ollama-style endpoint via its
//! non-streaming `/api/generate` contract. It implements the
//! `ironbrief_core::TextGenerator` trait; everything above it is
//! backend-agnostic.

pub mod ollama;

pub use ollama::OllamaClient;
