//! Plugin lifecycle hooks exposed to the host
//!
//! A host knows plugins only through an id plus an init hook and an unmount
//! hook. `register_plugin` wires any `Plugin` into a `PluginRegistry`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::host::PluginRegistry;

/// Host-supplied context passed to the init hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginContext {
    /// Identifier of the host page reserved for the plugin, if any
    pub page: Option<String>,
    /// Cache directory the host grants the plugin, if any
    pub cache_dir: Option<PathBuf>,
}

/// A plugin driven by host lifecycle hooks
#[async_trait]
pub trait Plugin: Send {
    /// Fixed identifier the plugin registers under
    fn id(&self) -> &str;

    /// Init hook, run when the host enables the plugin
    async fn init(&mut self, base_url: &str, context: PluginContext);

    /// Unmount hook, run when the host disables the plugin
    async fn destroy(&mut self);
}

/// Plugin handle shared between the host and its owner
pub type SharedPlugin = Arc<Mutex<dyn Plugin>>;

/// Registers `plugin` with the host under its own id
///
/// Returns a typed handle so the owner can still reach the concrete plugin.
pub fn register_plugin<P>(registry: &dyn PluginRegistry, plugin: P) -> Arc<Mutex<P>>
where
    P: Plugin + 'static,
{
    let id = plugin.id().to_string();
    let handle = Arc::new(Mutex::new(plugin));
    let shared: SharedPlugin = handle.clone();
    registry.set_plugin(&id, shared);
    tracing::debug!(plugin_id = %id, "Plugin hooks registered");
    handle
}
