//! Configuration for the snippet service
//!
//! Settings are read from TOML; every key is optional.

pub mod settings;

pub use settings::{CompletionSettings, ModeMatch, ServiceSettings, DEFAULT_PLUGIN_ID};
