//! Shared handle to the active knowledge-base snapshot.
//!
//! Queries clone an `Arc` to the current snapshot and score against it with
//! no lock held; a reload builds the replacement off to the side and swaps
//! the `Arc` under a short write lock. A query started before the swap keeps
//! the old snapshot whole — readers never observe a half-built base.

use crate::base::KnowledgeBase;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Thread-safe handle to the active snapshot.
///
/// The base itself is immutable; this handle only swaps which snapshot is
/// current. Mutable access to a live base is never handed out.
#[derive(Debug)]
pub struct KnowledgeStore {
    inner: RwLock<Arc<KnowledgeBase>>,
}

impl KnowledgeStore {
    /// Wrap an initial snapshot.
    pub fn new(base: KnowledgeBase) -> Self {
        Self {
            inner: RwLock::new(Arc::new(base)),
        }
    }

    /// The current snapshot. Stays valid for as long as the caller holds it,
    /// even across reloads.
    pub fn current(&self) -> Arc<KnowledgeBase> {
        // A poisoned lock still guards a whole snapshot: the only write is a
        // single pointer swap.
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install a new snapshot. In-flight queries keep the old one.
    pub fn replace(&self, base: KnowledgeBase) {
        let next = Arc::new(base);
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!(
            "Replacing knowledge base: {} -> {} entries",
            guard.len(),
            next.len()
        );
        *guard = next;
    }

    /// Rebuild from the given topic files and swap the result in.
    ///
    /// This is the hook for the external "content was edited" signal.
    pub fn reload_from_paths(&self, paths: &[PathBuf]) {
        self.replace(KnowledgeBase::load_paths(paths));
    }

    /// Rebuild from every `.txt` file under `dir` and swap the result in.
    pub fn reload_from_dir(&self, dir: &Path) {
        self.replace(KnowledgeBase::load_dir(dir));
    }

    /// Answer a question against the current snapshot.
    pub fn answer(&self, question: &str, fallback: &str) -> String {
        crate::matcher::answer(question, &self.current(), fallback)
    }
}
