//! Snippet service lifecycle
//!
//! `SnippetService` ties the loader, palette registrar and completer to a
//! set of host ports and makes `destroy` undo exactly what `init`
//! registered. Load failures never escape `init`; they are shown as a toast,
//! logged, and leave the service `Degraded`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::ServiceSettings;
use crate::host::{Completer, HostPorts};
use crate::loader::{normalize_base_url, SnippetFetcher, SnippetLoader, SourceFetcher};
use crate::logging::{span_names, LOG_PREFIX};
use crate::models::Snippet;
use crate::plugin::{Plugin, PluginContext};
use crate::snippet::{PaletteRegistrar, SnippetCompleter, SnippetInserter, SnippetStore};

/// Toast shown when the host autocomplete framework rejects the completer
pub const AUTOCOMPLETE_ERROR: &str = "Autocomplete error.";

/// Lifecycle state of a `SnippetService`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Constructed, `init` not called yet
    Uninitialized,
    /// Fetching the snippet source
    Loading,
    /// Snippets loaded and registered with the host
    Ready,
    /// Load failed, nothing registered
    Degraded,
    /// Registrations undone; terminal
    TornDown,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Degraded => "degraded",
            Self::TornDown => "torn down",
        };
        f.write_str(name)
    }
}

/// Snippet palette and autocomplete plugin bound to one host
pub struct SnippetService {
    settings: ServiceSettings,
    ports: HostPorts,
    loader: SnippetLoader,
    registrar: PaletteRegistrar,
    store: SnippetStore,
    state: ServiceState,
    base_url: Option<String>,
    commands: Vec<String>,
    completer: Option<Arc<dyn Completer>>,
}

impl SnippetService {
    /// Creates a service fetching through `fetcher`
    #[must_use]
    pub fn new(
        settings: ServiceSettings,
        ports: HostPorts,
        fetcher: Arc<dyn SnippetFetcher>,
    ) -> Self {
        let loader = SnippetLoader::new(fetcher, settings.source_file.clone());
        let inserter = SnippetInserter::new(
            Arc::clone(&ports.editors),
            Arc::clone(&ports.notifier),
            settings.toast_duration_ms,
        );
        let registrar = PaletteRegistrar::new(Arc::clone(&ports.commands), inserter);

        Self {
            settings,
            ports,
            loader,
            registrar,
            store: SnippetStore::new(),
            state: ServiceState::Uninitialized,
            base_url: None,
            commands: Vec::new(),
            completer: None,
        }
    }

    /// Creates a service with default settings, fetching over HTTP or from disk
    #[must_use]
    pub fn with_defaults(ports: HostPorts) -> Self {
        Self::new(
            ServiceSettings::default(),
            ports,
            Arc::new(SourceFetcher::new()),
        )
    }

    /// Current lifecycle state
    pub const fn state(&self) -> ServiceState {
        self.state
    }

    /// Settings the service was built with
    pub const fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Normalized base URL passed to the last `init`
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Names of the palette commands currently registered
    pub fn command_names(&self) -> &[String] {
        &self.commands
    }

    /// The loaded snippet list, including unusable entries
    pub fn snippets(&self) -> Arc<[Snippet]> {
        self.store.snapshot()
    }

    /// Returns true while a completer is registered with the host
    pub const fn has_completer(&self) -> bool {
        self.completer.is_some()
    }

    /// Loads snippets and registers them with the host
    ///
    /// Only the first call on a fresh service does anything; later calls are
    /// ignored so registration happens at most once per lifecycle. Returns
    /// the resulting state.
    pub async fn init(&mut self, base_url: &str) -> ServiceState {
        if self.state != ServiceState::Uninitialized {
            warn!(state = %self.state, "Ignoring init on an already initialized service");
            return self.state;
        }

        let base_url = normalize_base_url(base_url);
        let span = info_span!(span_names::SERVICE_INIT, base_url = %base_url);
        self.run_init(base_url).instrument(span).await;
        self.state
    }

    async fn run_init(&mut self, base_url: String) {
        self.state = ServiceState::Loading;
        let result = self.loader.load(&base_url).await;
        self.base_url = Some(base_url);

        match result {
            Ok(snippets) => {
                self.store.replace(snippets);
                let snapshot = self.store.snapshot();
                self.commands = self.registrar.register(&snapshot);
                if !snapshot.is_empty() {
                    self.register_completer();
                }
                self.state = ServiceState::Ready;
                info!(
                    loaded = snapshot.len(),
                    commands = self.commands.len(),
                    completer = self.completer.is_some(),
                    "Snippet service ready"
                );
            }
            Err(e) => {
                self.report_failure(&e.to_string());
                self.state = ServiceState::Degraded;
            }
        }
    }

    fn register_completer(&mut self) {
        let Some(registry) = &self.ports.completions else {
            debug!("Host has no autocomplete registry, skipping completer");
            return;
        };

        let completer: Arc<dyn Completer> = Arc::new(SnippetCompleter::new(
            self.store.clone(),
            self.settings.completion.clone(),
        ));

        match registry.add_completer(Arc::clone(&completer)) {
            Ok(()) => self.completer = Some(completer),
            Err(e) => {
                warn!(error = %e, "Completer registration failed");
                self.report_failure(AUTOCOMPLETE_ERROR);
            }
        }
    }

    /// Undoes every registration made by `init`
    ///
    /// The completer is removed by identity, leaving other completers in the
    /// host list untouched. Calling this again is a no-op.
    pub fn destroy(&mut self) {
        if self.state == ServiceState::TornDown {
            debug!("Snippet service already torn down");
            return;
        }
        let _span = info_span!(span_names::SERVICE_DESTROY, state = %self.state).entered();

        self.registrar.unregister(&self.commands);
        let undefined = std::mem::take(&mut self.commands).len();

        if let Some(completer) = self.completer.take() {
            if let Some(registry) = &self.ports.completions {
                let remaining: Vec<Arc<dyn Completer>> = registry
                    .completers()
                    .into_iter()
                    .filter(|c| !Arc::ptr_eq(c, &completer))
                    .collect();
                registry.set_completers(remaining);
            }
        }

        self.store.clear();
        self.state = ServiceState::TornDown;
        info!(undefined, "Snippet service torn down");
    }

    fn report_failure(&self, message: &str) {
        self.ports
            .notifier
            .show_toast(message, self.settings.toast_duration_ms);
        error!("{LOG_PREFIX} {message}");
    }
}

#[async_trait]
impl Plugin for SnippetService {
    fn id(&self) -> &str {
        &self.settings.plugin_id
    }

    async fn init(&mut self, base_url: &str, context: PluginContext) {
        debug!(
            page = ?context.page,
            cache_dir = ?context.cache_dir,
            "Plugin init hook"
        );
        Self::init(self, base_url).await;
    }

    async fn destroy(&mut self) {
        Self::destroy(self);
    }
}
