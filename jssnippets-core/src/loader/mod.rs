//! Snippet source loading
//!
//! Fetches `{base_url}{source_file}`, checks that it is a JSON array and
//! turns every element into a `Snippet`. Elements are not validated here;
//! unusable entries are filtered by the palette and completion stages.

mod fetch;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::models::Snippet;

pub use fetch::{FetchResponse, FileFetcher, HttpFetcher, SnippetFetcher, SourceFetcher};

/// Ensures `base_url` ends with a path separator
#[must_use]
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

/// Parses a snippet source body
///
/// # Errors
///
/// Returns `LoadError::Runtime` for malformed JSON and `LoadError::Format`
/// when the document is valid JSON but not an array.
pub fn parse_snippets(body: &str) -> LoadResult<Vec<Snippet>> {
    let document: Value = serde_json::from_str(body)?;
    let Value::Array(items) = document else {
        return Err(LoadError::Format(json_kind(&document).to_string()));
    };
    Ok(items.iter().map(Snippet::from_value).collect())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loads the snippet list relative to a base URL
#[derive(Clone)]
pub struct SnippetLoader {
    fetcher: Arc<dyn SnippetFetcher>,
    source_file: String,
}

impl SnippetLoader {
    /// Creates a loader reading `source_file` through `fetcher`
    #[must_use]
    pub fn new(fetcher: Arc<dyn SnippetFetcher>, source_file: impl Into<String>) -> Self {
        Self {
            fetcher,
            source_file: source_file.into(),
        }
    }

    /// Full URL of the source for `base_url`, which must already end with `/`
    #[must_use]
    pub fn source_url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.source_file)
    }

    /// Fetches and parses the snippet source
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Http` on a non-success status, `LoadError::Format`
    /// if the body is not an array, `LoadError::Runtime` for anything else.
    #[tracing::instrument(skip(self), fields(source = %self.source_file))]
    pub async fn load(&self, base_url: &str) -> LoadResult<Vec<Snippet>> {
        let url = self.source_url(base_url);
        let response = self.fetcher.get(&url).await?;

        if !response.is_success() {
            return Err(LoadError::Http {
                status: response.status,
                url,
            });
        }

        let snippets = parse_snippets(&response.body)?;
        debug!(count = snippets.len(), "Snippet source parsed");
        Ok(snippets)
    }
}
