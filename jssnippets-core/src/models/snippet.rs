//! Snippet model for reusable code templates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reusable code template loaded from the snippet source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Trigger text typed by the user
    #[serde(default)]
    pub prefix: String,
    /// Template body (may contain `${n:label}` or `$n` placeholders)
    #[serde(default)]
    pub code: String,
    /// Optional label shown in the command palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional completion score overriding the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Snippet {
    /// Creates a new snippet with the given prefix and code
    #[must_use]
    pub fn new(prefix: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            code: code.into(),
            description: None,
            score: None,
        }
    }

    /// Sets the description for this snippet
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion score for this snippet
    #[must_use]
    pub const fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    /// Builds a snippet from an arbitrary JSON element
    ///
    /// Never fails: fields that are missing or not of the expected type are
    /// left empty so that the entry is filtered out later instead of
    /// rejecting the whole source.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            prefix: text("prefix").unwrap_or_default(),
            code: text("code").unwrap_or_default(),
            description: text("description").filter(|d| !d.is_empty()),
            score: value
                .get("score")
                .and_then(Value::as_u64)
                .and_then(|s| u32::try_from(s).ok()),
        }
    }

    /// Returns true if both `prefix` and `code` are non-empty
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.prefix.is_empty() && !self.code.is_empty()
    }

    /// Label shown in the command palette
    #[must_use]
    pub fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Insert {}", self.prefix))
    }
}
