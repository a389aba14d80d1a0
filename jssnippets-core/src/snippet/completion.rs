//! Autocomplete provider backed by the live snippet collection.

use tracing::trace;

use crate::config::CompletionSettings;
use crate::host::{CompletionCallback, Completer};
use crate::models::{CompletionContext, CompletionItem, SNIPPET_KIND};

use super::store::SnippetStore;

/// Completer offering snippets whose prefix starts with the typed text
#[derive(Debug, Clone)]
pub struct SnippetCompleter {
    store: SnippetStore,
    settings: CompletionSettings,
}

impl SnippetCompleter {
    /// Creates a completer reading from `store`
    #[must_use]
    pub fn new(store: SnippetStore, settings: CompletionSettings) -> Self {
        Self { store, settings }
    }

    /// Computes the items for a query
    ///
    /// Empty when the mode is not an allowed language or `prefix` is empty.
    /// Matching is case-insensitive and keeps collection order.
    #[must_use]
    pub fn completions(&self, context: &CompletionContext, prefix: &str) -> Vec<CompletionItem> {
        if prefix.is_empty() || !self.settings.accepts_mode(&context.mode_id) {
            return Vec::new();
        }

        let needle = prefix.to_lowercase();
        let items: Vec<CompletionItem> = self
            .store
            .snapshot()
            .iter()
            .filter(|s| s.is_usable() && s.prefix.to_lowercase().starts_with(&needle))
            .map(|s| CompletionItem {
                caption: s.prefix.clone(),
                snippet: s.code.clone(),
                meta: self.settings.meta.clone(),
                score: s.score.unwrap_or(self.settings.score),
                kind: SNIPPET_KIND.to_string(),
            })
            .collect();

        trace!(mode = %context.mode_id, prefix, matches = items.len(), "Completion query");
        items
    }
}

impl Completer for SnippetCompleter {
    fn get_completions(
        &self,
        context: &CompletionContext,
        prefix: &str,
        callback: CompletionCallback,
    ) {
        callback(self.completions(context, prefix));
    }
}
