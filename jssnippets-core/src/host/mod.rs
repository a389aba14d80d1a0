//! Host editor ports
//!
//! The snippet service never talks to a concrete editor. Everything it needs
//! from the host (command palette, autocomplete engine, focused editor,
//! notifications, plugin lifecycle hooks) is expressed as a trait here and
//! injected at construction time. `memory` provides in-process adapters.

pub mod memory;

use std::sync::Arc;

use crate::error::HostResult;
use crate::models::{Command, CompletionContext, CompletionItem};
use crate::plugin::SharedPlugin;

pub use memory::{MemoryEditor, MemoryHost};

/// Callback receiving the result of a completion query
///
/// Taken by value so it can be invoked at most once; providers must invoke
/// it exactly once per query.
pub type CompletionCallback = Box<dyn FnOnce(Vec<CompletionItem>) + Send>;

/// Host command palette registry
pub trait CommandRegistry: Send + Sync {
    /// Registers a command under `name`, replacing any existing definition
    fn define(&self, name: &str, command: Command);

    /// Removes the command registered under `name`, if any
    fn undefine(&self, name: &str);
}

/// Autocomplete source registered with the host
pub trait Completer: Send + Sync {
    /// Answers a completion query for the text typed before the cursor
    fn get_completions(
        &self,
        context: &CompletionContext,
        prefix: &str,
        callback: CompletionCallback,
    );
}

/// Host autocomplete registry
pub trait CompletionRegistry: Send + Sync {
    /// Appends a completer to the host list
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the autocomplete framework rejects the completer.
    fn add_completer(&self, completer: Arc<dyn Completer>) -> HostResult<()>;

    /// Returns the current completer list
    fn completers(&self) -> Vec<Arc<dyn Completer>>;

    /// Replaces the completer list
    fn set_completers(&self, completers: Vec<Arc<dyn Completer>>);
}

/// A text editor that can receive inserted text
pub trait Editor: Send + Sync {
    /// Whether the editor expands placeholder syntax natively
    fn supports_snippets(&self) -> bool;

    /// Inserts a template, expanding placeholders
    fn insert_snippet(&self, template: &str);

    /// Inserts plain text at the cursor
    fn insert(&self, text: &str);
}

/// Accessor for the currently focused editor
pub trait EditorManager: Send + Sync {
    /// Returns the focused editor, if any
    fn active_editor(&self) -> Option<Arc<dyn Editor>>;
}

/// User-visible transient notifications
pub trait NotificationSink: Send + Sync {
    /// Shows `message` for `duration_ms` milliseconds
    fn show_toast(&self, message: &str, duration_ms: u64);
}

/// Host registry of plugin lifecycle hooks
pub trait PluginRegistry: Send + Sync {
    /// Registers init and unmount hooks for `plugin` under `id`
    fn set_plugin(&self, id: &str, plugin: SharedPlugin);
}

/// The set of host capabilities a snippet service is wired to
#[derive(Clone)]
pub struct HostPorts {
    /// Command palette
    pub commands: Arc<dyn CommandRegistry>,
    /// Autocomplete engine, `None` when the host has none loaded
    pub completions: Option<Arc<dyn CompletionRegistry>>,
    /// Focused editor accessor
    pub editors: Arc<dyn EditorManager>,
    /// Toast sink
    pub notifier: Arc<dyn NotificationSink>,
}

impl HostPorts {
    /// Creates a port set with an autocomplete registry
    #[must_use]
    pub fn new(
        commands: Arc<dyn CommandRegistry>,
        completions: Arc<dyn CompletionRegistry>,
        editors: Arc<dyn EditorManager>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            commands,
            completions: Some(completions),
            editors,
            notifier,
        }
    }

    /// Drops the autocomplete registry, as in a host without autocomplete
    #[must_use]
    pub fn without_completions(mut self) -> Self {
        self.completions = None;
        self
    }
}
