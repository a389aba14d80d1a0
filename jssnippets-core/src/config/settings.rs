//! Service settings model
//!
//! This module defines the settings that tune the snippet service. Every
//! field has a default, so an empty or missing settings file yields the
//! stock plugin behavior.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Identifier under which the plugin registers with the host
pub const DEFAULT_PLUGIN_ID: &str = "com.alloso.javascript.snippets";

/// Service-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Plugin identifier used for host lifecycle hooks
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,
    /// Snippet source file name, resolved against the base URL
    #[serde(default = "default_source_file")]
    pub source_file: String,
    /// Duration of failure toasts in milliseconds
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    /// Autocomplete settings
    #[serde(default)]
    pub completion: CompletionSettings,
}

fn default_plugin_id() -> String {
    DEFAULT_PLUGIN_ID.to_string()
}

fn default_source_file() -> String {
    "javascript.json".to_string()
}

const fn default_toast_duration() -> u64 {
    5000
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            plugin_id: default_plugin_id(),
            source_file: default_source_file(),
            toast_duration_ms: default_toast_duration(),
            completion: CompletionSettings::default(),
        }
    }
}

impl ServiceSettings {
    /// Loads settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, malformed, or
    /// fails validation.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this model or
    /// fails validation.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates settings values
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.plugin_id.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "plugin_id".to_string(),
                reason: "Plugin id cannot be empty".to_string(),
            });
        }

        if self.source_file.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "source_file".to_string(),
                reason: "Source file name cannot be empty".to_string(),
            });
        }

        if self.completion.allowed_modes.iter().all(|m| m.is_empty()) {
            return Err(ConfigError::Validation {
                field: "completion.allowed_modes".to_string(),
                reason: "At least one language mode is required".to_string(),
            });
        }

        Ok(())
    }
}

/// How the host mode id is compared against the allowed modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeMatch {
    /// Mode id contains an allowed mode (`ace/mode/javascript` matches `javascript`)
    #[default]
    Substring,
    /// Mode id equals an allowed mode
    Exact,
}

impl ModeMatch {
    /// Returns true if `mode_id` is accepted for `allowed`
    #[must_use]
    pub fn matches(self, mode_id: &str, allowed: &str) -> bool {
        match self {
            Self::Substring => mode_id.contains(allowed),
            Self::Exact => mode_id == allowed,
        }
    }
}

/// Autocomplete settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Language modes the completer answers for
    #[serde(default = "default_allowed_modes")]
    pub allowed_modes: Vec<String>,
    /// Mode comparison strategy
    #[serde(default)]
    pub mode_match: ModeMatch,
    /// Source label attached to each completion
    #[serde(default = "default_meta")]
    pub meta: String,
    /// Score used when a snippet has no override
    #[serde(default = "default_score")]
    pub score: u32,
}

fn default_allowed_modes() -> Vec<String> {
    ["javascript", "typescript", "jsx", "tsx"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_meta() -> String {
    "EJ Snippet".to_string()
}

const fn default_score() -> u32 {
    1000
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            allowed_modes: default_allowed_modes(),
            mode_match: ModeMatch::default(),
            meta: default_meta(),
            score: default_score(),
        }
    }
}

impl CompletionSettings {
    /// Returns true if completions should be offered for `mode_id`
    #[must_use]
    pub fn accepts_mode(&self, mode_id: &str) -> bool {
        self.allowed_modes
            .iter()
            .filter(|m| !m.is_empty())
            .any(|m| self.mode_match.matches(mode_id, m))
    }
}
