//! JS Snippets Core Library
//!
//! This crate loads a JavaScript snippet list and exposes it to a host
//! editor as palette commands and autocomplete suggestions. The host is
//! reached only through the ports in [`host`], so the service runs the same
//! against a real editor or the in-memory host used by tests and the CLI.

pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod logging;
pub mod models;
pub mod plugin;
pub mod service;
pub mod snippet;

pub use config::{CompletionSettings, ModeMatch, ServiceSettings, DEFAULT_PLUGIN_ID};
pub use error::{
    ConfigError, ConfigResult, HostError, HostResult, LoadError, LoadResult, SnippetError,
};
pub use host::{
    CommandRegistry, Completer, CompletionCallback, CompletionRegistry, Editor, EditorManager,
    HostPorts, MemoryEditor, MemoryHost, NotificationSink, PluginRegistry,
};
pub use loader::{
    normalize_base_url, parse_snippets, FetchResponse, FileFetcher, HttpFetcher, SnippetFetcher,
    SnippetLoader, SourceFetcher,
};
pub use models::{Command, CompletionContext, CompletionItem, Snippet};
pub use plugin::{register_plugin, Plugin, PluginContext, SharedPlugin};
pub use service::{ServiceState, SnippetService, AUTOCOMPLETE_ERROR};
pub use snippet::{
    command_name, strip_placeholders, PaletteRegistrar, SnippetCompleter, SnippetInserter,
    SnippetStore,
};
