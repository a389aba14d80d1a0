//! Error types for JS Snippets
//!
//! This module defines the error types used by the snippet service: loading
//! the snippet source, talking to host registries, and reading settings.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for snippet service operations
#[derive(Debug, Error)]
pub enum SnippetError {
    /// Snippet source loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Host registry errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while fetching and validating the snippet source
///
/// The `Display` output of each variant is the exact text shown to the user
/// in the failure toast.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source responded with a non-success status
    #[error("Load failed: {status}")]
    Http {
        /// Status code reported by the fetcher
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The body parsed but is not a JSON array
    #[error("Invalid JSON format.")]
    Format(String),

    /// Anything else: transport failures, malformed JSON, unreadable files
    #[error("Init error: {0}")]
    Runtime(String),
}

impl LoadError {
    /// Returns the HTTP status code for `Http` errors
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Format(_) | Self::Runtime(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Runtime(err.to_string())
    }
}

/// Errors reported by host registries
#[derive(Debug, Error)]
pub enum HostError {
    /// The autocomplete framework is not available in this host
    #[error("Autocomplete framework unavailable: {0}")]
    CompletionUnavailable(String),
}

/// Errors related to settings file operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse settings file
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Invalid settings value
    #[error("Invalid settings value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Settings file not found
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    /// I/O errors while reading settings
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for snippet service operations
pub type Result<T> = std::result::Result<T, SnippetError>;

/// Result type alias for load operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type alias for host registry operations
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Result type alias for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
