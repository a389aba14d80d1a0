//! Command palette registration.

use std::sync::Arc;

use tracing::debug;

use crate::host::CommandRegistry;
use crate::models::{Command, Snippet};

use super::insert::SnippetInserter;

/// Replaces every character outside `[A-Za-z0-9_]` with `_`
#[must_use]
pub fn sanitize_prefix(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Palette command name for the snippet at `index` in the loaded list
///
/// The index keeps names unique even when sanitized prefixes collide.
#[must_use]
pub fn command_name(prefix: &str, index: usize) -> String {
    format!("snippet-{}-{index}", sanitize_prefix(prefix))
}

/// Defines one palette command per usable snippet
#[derive(Clone)]
pub struct PaletteRegistrar {
    registry: Arc<dyn CommandRegistry>,
    inserter: SnippetInserter,
}

impl PaletteRegistrar {
    /// Creates a registrar over the host command registry
    #[must_use]
    pub fn new(registry: Arc<dyn CommandRegistry>, inserter: SnippetInserter) -> Self {
        Self { registry, inserter }
    }

    /// Registers a command for every snippet with a non-empty prefix and code
    ///
    /// Returns the registered names, in input order, for later teardown.
    pub fn register(&self, snippets: &[Snippet]) -> Vec<String> {
        let mut names = Vec::new();

        for (index, snippet) in snippets.iter().enumerate() {
            if !snippet.is_usable() {
                debug!(index, "Skipping snippet without prefix or code");
                continue;
            }

            let name = command_name(&snippet.prefix, index);
            let inserter = self.inserter.clone();
            let code = snippet.code.clone();
            let command = Command::new(Arc::new(move || inserter.insert(&code)), snippet.label());

            self.registry.define(&name, command);
            names.push(name);
        }

        debug!(
            registered = names.len(),
            skipped = snippets.len() - names.len(),
            "Palette commands registered"
        );
        names
    }

    /// Undefines every command in `names`
    pub fn unregister(&self, names: &[String]) {
        for name in names {
            self.registry.undefine(name);
        }
    }
}
