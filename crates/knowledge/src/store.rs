//! The knowledge store — owner of the process-wide snapshot.
//!
//! `load()` reads every section's backing file under the root and swaps in a
//! brand-new snapshot behind an `Arc`; readers holding a previous snapshot
//! keep a consistent view, and `snapshot()` never touches the filesystem.
//! A missing source file empties its section and never aborts the load.

use crate::watcher::ChangeWatcher;
use ironbrief_core::error::KnowledgeError;
use ironbrief_core::knowledge::{KnowledgeSnapshot, Section};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long to let a burst of file events settle before reloading.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct KnowledgeStore {
    root: PathBuf,
    current: RwLock<Arc<KnowledgeSnapshot>>,
}

impl KnowledgeStore {
    /// Create a store over `root`. The snapshot starts empty; call `load()`
    /// to populate it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current: RwLock::new(Arc::new(KnowledgeSnapshot::empty())),
        }
    }

    /// The knowledge root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Reload every section from disk and replace the snapshot.
    ///
    /// A section whose source is missing (or unreadable) is set to the empty
    /// string; one bad file never aborts the rest of the load.
    pub async fn load(&self) -> Arc<KnowledgeSnapshot> {
        let mut sections = BTreeMap::new();
        for section in Section::ALL {
            let content = match self.read_section(section).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(section = %section, error = %e, "Knowledge source unavailable, section left empty");
                    String::new()
                }
            };
            sections.insert(section, content);
        }

        let snapshot = Arc::new(KnowledgeSnapshot::new(sections));
        *self.current.write().unwrap() = Arc::clone(&snapshot);

        info!(
            root = %self.root.display(),
            chars = snapshot.total_chars(),
            "Knowledge base loaded"
        );
        snapshot
    }

    async fn read_section(&self, section: Section) -> Result<String, KnowledgeError> {
        let path = self.root.join(section.file_name());
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KnowledgeError::SourceMissing {
                    path: path.display().to_string(),
                }
            } else {
                KnowledgeError::Read {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// The current snapshot. Never blocks on I/O; before the first `load()`
    /// this is the empty initial snapshot.
    pub fn snapshot(&self) -> Arc<KnowledgeSnapshot> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Reload whenever the watcher reports a change under the root.
    ///
    /// Best-effort: if the watch cannot be established the store keeps
    /// serving whatever was last loaded and returns `None`.
    pub fn watch(
        self: Arc<Self>,
        watcher: &dyn ChangeWatcher,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let mut rx = match watcher.watch(&self.root) {
            Ok(rx) => rx,
            Err(e) => {
                warn!(error = %e, "Could not watch knowledge root; auto-reload disabled");
                return None;
            }
        };

        let store = self;
        Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                debug!(path = %event.path.display(), "Knowledge source changed");
                // Let an editor's save burst settle, then fold the queue
                // into one reload.
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                while rx.try_recv().is_ok() {}
                store.load().await;
            }
        }))
    }
}
