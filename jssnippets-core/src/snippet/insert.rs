//! Inserting snippet code into the focused editor.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::host::{EditorManager, NotificationSink};

/// Notice shown when a command runs with no editor focused
pub const NO_EDITOR_NOTICE: &str = "No active editor to insert the snippet into.";

/// `${1:label}` tab stops, capturing the label
static LABELED_TAB_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\d+:([^}]+)\}").expect("Labeled tab stop regex is valid")
});

/// Bare `$1` tab stops
static BARE_TAB_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d+").expect("Bare tab stop regex is valid"));

/// Reduces a template to plain text
///
/// `${n:label}` becomes `label`, then every `$n` is removed. Other syntax
/// (such as `${n}` without a label) is left untouched.
#[must_use]
pub fn strip_placeholders(template: &str) -> String {
    let labeled = LABELED_TAB_STOP.replace_all(template, "${1}");
    BARE_TAB_STOP.replace_all(&labeled, "").into_owned()
}

/// Inserts snippet code into whichever editor has focus
#[derive(Clone)]
pub struct SnippetInserter {
    editors: Arc<dyn EditorManager>,
    notifier: Arc<dyn NotificationSink>,
    toast_duration_ms: u64,
}

impl SnippetInserter {
    /// Creates an inserter over the host editor accessor and toast sink
    #[must_use]
    pub fn new(
        editors: Arc<dyn EditorManager>,
        notifier: Arc<dyn NotificationSink>,
        toast_duration_ms: u64,
    ) -> Self {
        Self {
            editors,
            notifier,
            toast_duration_ms,
        }
    }

    /// Inserts `code` at the cursor of the focused editor
    ///
    /// Editors with native snippet support receive the raw template. Others
    /// receive the template with placeholders stripped.
    pub fn insert(&self, code: &str) {
        let Some(editor) = self.editors.active_editor() else {
            debug!("Snippet insert skipped, no active editor");
            self.notifier
                .show_toast(NO_EDITOR_NOTICE, self.toast_duration_ms);
            return;
        };

        if editor.supports_snippets() {
            editor.insert_snippet(code);
        } else {
            editor.insert(&strip_placeholders(code));
        }
    }
}
