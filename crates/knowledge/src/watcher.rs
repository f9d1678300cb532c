//! File-change watching for the knowledge root.
//!
//! The store is decoupled from the OS notification mechanism through the
//! `ChangeWatcher` trait: a watcher produces an unbounded sequence of change
//! events over a channel, and dies with its receiver. The production
//! implementation wraps `notify`; tests drive the store with a hand-fed
//! channel instead.

use ironbrief_core::error::KnowledgeError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// A single observed change to a knowledge source file.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: PathBuf,
}

/// Produces change notifications for files under a root directory.
///
/// `watch` may be called once per root; the returned receiver yields events
/// until the watcher is dropped. Setup failure is an error the caller treats
/// as non-fatal.
pub trait ChangeWatcher: Send + Sync {
    fn watch(&self, root: &Path) -> Result<mpsc::Receiver<ChangeEvent>, KnowledgeError>;
}

/// `notify`-backed watcher filtered to a single file extension.
pub struct FsWatcher {
    extension: String,
    // Keeps the OS watchers alive; dropped with the FsWatcher.
    watchers: Mutex<Vec<RecommendedWatcher>>,
}

impl FsWatcher {
    /// Watch for changes to `.{extension}` files.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            watchers: Mutex::new(Vec::new()),
        }
    }

    /// Default watcher for Markdown knowledge sources.
    pub fn markdown() -> Self {
        Self::new("md")
    }
}

impl Default for FsWatcher {
    fn default() -> Self {
        Self::markdown()
    }
}

fn is_content_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

impl ChangeWatcher for FsWatcher {
    fn watch(&self, root: &Path) -> Result<mpsc::Receiver<ChangeEvent>, KnowledgeError> {
        let (tx, rx) = mpsc::channel(64);
        let extension = self.extension.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let Ok(event) = res else { return };
                if !is_content_event(&event) {
                    return;
                }
                for path in event.paths {
                    let matches_ext = path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension.as_str()));
                    if matches_ext {
                        // Receiver gone means the store shut down; drop the event.
                        let _ = tx.blocking_send(ChangeEvent { path });
                    }
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| KnowledgeError::WatchSetup {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        watcher
            .watch(root, RecursiveMode::NonRecursive)
            .map_err(|e| KnowledgeError::WatchSetup {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;

        self.watchers.lock().unwrap().push(watcher);
        Ok(rx)
    }
}
