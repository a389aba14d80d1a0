//! Completion items handed back to the host autocomplete engine.

use serde::{Deserialize, Serialize};

/// Kind tag attached to every snippet-provided completion
pub const SNIPPET_KIND: &str = "snippet";

/// A single autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Text displayed in the suggestion list
    pub caption: String,
    /// Template the host expands on acceptance
    pub snippet: String,
    /// Source label shown next to the caption
    pub meta: String,
    /// Ranking score used by the host sort
    pub score: u32,
    /// Suggestion kind
    #[serde(rename = "type")]
    pub kind: String,
}

/// Editing context supplied by the host for a completion query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionContext {
    /// Language mode identifier of the current session (e.g. `ace/mode/javascript`)
    pub mode_id: String,
}

impl CompletionContext {
    /// Creates a context for the given mode id
    #[must_use]
    pub fn new(mode_id: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
        }
    }
}
