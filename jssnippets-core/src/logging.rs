//! Tracing conventions shared across the crate.

/// Span names used by the snippet service
pub mod span_names {
    /// Service initialization, from base URL normalization to registration
    pub const SERVICE_INIT: &str = "jssnippets.service.init";
    /// Service teardown
    pub const SERVICE_DESTROY: &str = "jssnippets.service.destroy";
}

/// Prefix for user-facing failure lines in the log
pub const LOG_PREFIX: &str = "[JSSnippets]";
