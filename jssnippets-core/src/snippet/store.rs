//! Shared snippet collection.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Snippet;

/// Live snippet collection shared by the service and its completer
///
/// Clones share the same collection. Readers take a cheap snapshot so no
/// lock is held while filtering.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    inner: Arc<RwLock<Arc<[Snippet]>>>,
}

impl Default for SnippetStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::from(Vec::new()))),
        }
    }
}

impl SnippetStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection
    pub fn replace(&self, snippets: Vec<Snippet>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Arc::from(snippets);
    }

    /// Empties the collection
    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    /// Returns the current collection
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Snippet]> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of loaded entries, usable or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns true if nothing is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
