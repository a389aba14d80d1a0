//! Fetchers for the snippet source
//!
//! The loader only needs a status code and a body. `HttpFetcher` gets them
//! over HTTP, `FileFetcher` from the local filesystem (plugins installed on
//! disk are usually served from a `file://` base URL), and `SourceFetcher`
//! picks one by URL scheme.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LoadError, LoadResult};

/// Status and body of a fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl FetchResponse {
    /// A `200` response carrying `body`
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// A bodiless response with `status`
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// Returns true for 2xx statuses
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Abstraction over where the snippet source comes from
#[async_trait]
pub trait SnippetFetcher: Send + Sync {
    /// GETs `url`
    ///
    /// A non-success status is a valid response, not an error.
    ///
    /// # Errors
    /// Returns `LoadError::Runtime` if no response could be obtained at all
    async fn get(&self, url: &str) -> LoadResult<FetchResponse>;
}

/// Fetches over HTTP(S) with `reqwest`
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher reusing an existing client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnippetFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> LoadResult<FetchResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Runtime(e.to_string()))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "HTTP fetch completed");
        if !status.is_success() {
            return Ok(FetchResponse::status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Runtime(e.to_string()))?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Reads `file://` URLs and bare paths from disk
///
/// A missing file answers `404` so it is reported like a missing HTTP
/// resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    /// Maps a `file://` URL or bare path to a filesystem path
    #[must_use]
    pub fn path_for(url: &str) -> PathBuf {
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

#[async_trait]
impl SnippetFetcher for FileFetcher {
    async fn get(&self, url: &str) -> LoadResult<FetchResponse> {
        let path = Self::path_for(url);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Snippet file not found");
                Ok(FetchResponse::status(404))
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(FetchResponse::status(403)),
            Err(e) => Err(LoadError::Runtime(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Dispatches to HTTP or file fetching by URL scheme
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    /// Creates a dispatcher with default fetchers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher using `http` for HTTP(S) URLs
    #[must_use]
    pub const fn with_http(http: HttpFetcher) -> Self {
        Self {
            http,
            file: FileFetcher,
        }
    }

    fn is_http(url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

#[async_trait]
impl SnippetFetcher for SourceFetcher {
    async fn get(&self, url: &str) -> LoadResult<FetchResponse> {
        if Self::is_http(url) {
            self.http.get(url).await
        } else {
            self.file.get(url).await
        }
    }
}
