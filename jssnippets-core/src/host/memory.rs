//! In-memory host adapters
//!
//! `MemoryHost` implements every host port with plain in-process state. It
//! backs the unit and property tests and the headless CLI.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{HostError, HostResult};
use crate::models::{Command, CompletionContext, CompletionItem};
use crate::plugin::{PluginContext, SharedPlugin};

use super::{
    CommandRegistry, Completer, CompletionRegistry, Editor, EditorManager, HostPorts,
    NotificationSink, PluginRegistry,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A single insertion recorded by `MemoryEditor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// Template passed to the native snippet mechanism
    Snippet(String),
    /// Plain text inserted at the cursor
    Text(String),
}

/// Editor that records what was inserted into it
#[derive(Debug, Default)]
pub struct MemoryEditor {
    native_snippets: bool,
    insertions: Mutex<Vec<Insertion>>,
}

impl MemoryEditor {
    /// Creates an editor with native snippet support
    #[must_use]
    pub fn with_snippets() -> Self {
        Self {
            native_snippets: true,
            insertions: Mutex::new(Vec::new()),
        }
    }

    /// Creates an editor that only accepts plain text
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Returns every insertion in order
    #[must_use]
    pub fn insertions(&self) -> Vec<Insertion> {
        lock(&self.insertions).clone()
    }

    /// Returns the concatenated inserted content
    #[must_use]
    pub fn contents(&self) -> String {
        lock(&self.insertions)
            .iter()
            .map(|i| match i {
                Insertion::Snippet(s) | Insertion::Text(s) => s.as_str(),
            })
            .collect()
    }
}

impl Editor for MemoryEditor {
    fn supports_snippets(&self) -> bool {
        self.native_snippets
    }

    fn insert_snippet(&self, template: &str) {
        lock(&self.insertions).push(Insertion::Snippet(template.to_string()));
    }

    fn insert(&self, text: &str) {
        lock(&self.insertions).push(Insertion::Text(text.to_string()));
    }
}

/// In-process host with a command palette, completer list, toast log,
/// optional focused editor and plugin hook table
#[derive(Default)]
pub struct MemoryHost {
    commands: Mutex<Vec<(String, Command)>>,
    completers: Mutex<Vec<Arc<dyn Completer>>>,
    completion_failure: Mutex<Option<String>>,
    toasts: Mutex<Vec<(String, u64)>>,
    editor: Mutex<Option<Arc<dyn Editor>>>,
    plugins: Mutex<HashMap<String, SharedPlugin>>,
}

impl MemoryHost {
    /// Creates an empty host with no focused editor
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the full port set backed by this host
    #[must_use]
    pub fn ports(self: &Arc<Self>) -> HostPorts {
        HostPorts::new(
            Arc::clone(self) as Arc<dyn CommandRegistry>,
            Arc::clone(self) as Arc<dyn CompletionRegistry>,
            Arc::clone(self) as Arc<dyn EditorManager>,
            Arc::clone(self) as Arc<dyn NotificationSink>,
        )
    }

    /// Focuses `editor`
    pub fn focus(&self, editor: Arc<dyn Editor>) {
        *lock(&self.editor) = Some(editor);
    }

    /// Clears the focused editor
    pub fn blur(&self) {
        *lock(&self.editor) = None;
    }

    /// Makes subsequent `add_completer` calls fail with `reason`
    pub fn reject_completers(&self, reason: impl Into<String>) {
        *lock(&self.completion_failure) = Some(reason.into());
    }

    /// Names of all defined commands in definition order
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        lock(&self.commands).iter().map(|(n, _)| n.clone()).collect()
    }

    /// Returns the command registered under `name`
    #[must_use]
    pub fn command(&self, name: &str) -> Option<Command> {
        lock(&self.commands)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
    }

    /// Runs the command registered under `name`, returning false if unknown
    pub fn exec(&self, name: &str) -> bool {
        // Clone out of the lock so the command may call back into the host
        let Some(command) = self.command(name) else {
            return false;
        };
        command.run();
        true
    }

    /// Number of registered completers
    #[must_use]
    pub fn completer_count(&self) -> usize {
        lock(&self.completers).len()
    }

    /// Runs a completion query against every registered completer
    #[must_use]
    pub fn query(&self, context: &CompletionContext, prefix: &str) -> Vec<CompletionItem> {
        let completers = self.completers();
        let results = Arc::new(Mutex::new(Vec::new()));
        for completer in completers {
            let sink = Arc::clone(&results);
            completer.get_completions(
                context,
                prefix,
                Box::new(move |items| lock(&sink).extend(items)),
            );
        }
        let items = lock(&results).clone();
        items
    }

    /// Every toast shown so far with its duration
    #[must_use]
    pub fn toasts(&self) -> Vec<(String, u64)> {
        lock(&self.toasts).clone()
    }

    /// Runs the init hook of the plugin registered under `id`
    ///
    /// Returns false if no plugin is registered under `id`.
    pub async fn mount(&self, id: &str, base_url: &str, context: PluginContext) -> bool {
        let plugin = lock(&self.plugins).get(id).cloned();
        let Some(plugin) = plugin else {
            return false;
        };
        plugin.lock().await.init(base_url, context).await;
        true
    }

    /// Runs the unmount hook of the plugin registered under `id`
    ///
    /// Returns false if no plugin is registered under `id`.
    pub async fn unmount(&self, id: &str) -> bool {
        let plugin = lock(&self.plugins).get(id).cloned();
        let Some(plugin) = plugin else {
            return false;
        };
        plugin.lock().await.destroy().await;
        true
    }
}

impl CommandRegistry for MemoryHost {
    fn define(&self, name: &str, command: Command) {
        let mut commands = lock(&self.commands);
        if let Some(slot) = commands.iter_mut().find(|(n, _)| n == name) {
            slot.1 = command;
        } else {
            commands.push((name.to_string(), command));
        }
    }

    fn undefine(&self, name: &str) {
        lock(&self.commands).retain(|(n, _)| n != name);
    }
}

impl CompletionRegistry for MemoryHost {
    fn add_completer(&self, completer: Arc<dyn Completer>) -> HostResult<()> {
        if let Some(reason) = lock(&self.completion_failure).clone() {
            return Err(HostError::CompletionUnavailable(reason));
        }
        lock(&self.completers).push(completer);
        Ok(())
    }

    fn completers(&self) -> Vec<Arc<dyn Completer>> {
        lock(&self.completers).clone()
    }

    fn set_completers(&self, completers: Vec<Arc<dyn Completer>>) {
        *lock(&self.completers) = completers;
    }
}

impl EditorManager for MemoryHost {
    fn active_editor(&self) -> Option<Arc<dyn Editor>> {
        lock(&self.editor).clone()
    }
}

impl NotificationSink for MemoryHost {
    fn show_toast(&self, message: &str, duration_ms: u64) {
        lock(&self.toasts).push((message.to_string(), duration_ms));
    }
}

impl PluginRegistry for MemoryHost {
    fn set_plugin(&self, id: &str, plugin: SharedPlugin) {
        lock(&self.plugins).insert(id.to_string(), plugin);
    }
}
