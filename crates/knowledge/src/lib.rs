//! Knowledge base store for IronBrief.
//!
//! The store owns the process-wide `KnowledgeSnapshot` and is the only thing
//! that mutates it. `load()` fully replaces the snapshot; `snapshot()` hands
//! out a cheap read-only view; `watch()` keeps it fresh when the backing
//! files change on disk.

pub mod store;
pub mod watcher;

pub use store::KnowledgeStore;
pub use watcher::{ChangeEvent, ChangeWatcher, FsWatcher};
