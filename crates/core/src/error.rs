//! Error types for the IronBrief domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context has
//! its own enum; there is deliberately no retry anywhere — every failure is
//! handled exactly once by the caller's fallback path (script heuristic,
//! fail-open intent, apology reply, empty section).

use thiserror::Error;

/// Failures talking to the inference endpoint.
///
/// Propagated to callers as-is; each caller decides its own degraded
/// behavior instead of retrying.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    #[error("inference endpoint returned status {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("inference request failed: {0}")]
    Network(String),
}

/// Failures in the knowledge store.
///
/// None of these are fatal: a missing source leaves its section empty, and a
/// failed watch setup just disables auto-reload.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("knowledge source missing: {path}")]
    SourceMissing { path: String },

    #[error("failed to read knowledge source {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to watch {path}: {reason}")]
    WatchSetup { path: String, reason: String },
}
