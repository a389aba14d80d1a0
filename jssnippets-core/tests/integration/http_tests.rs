//! Tests for loading the snippet source over HTTP.
//!
//! A one-shot local server answers a single request with a canned status
//! and body.

use std::sync::Arc;

use jssnippets_core::{
    HttpFetcher, LoadError, MemoryHost, ServiceSettings, ServiceState, SnippetFetcher,
    SnippetLoader, SnippetService, SourceFetcher,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{SAMPLE_SOURCE, SAMPLE_USABLE};

/// Direct client so an ambient proxy configuration cannot intercept loopback
fn http() -> HttpFetcher {
    HttpFetcher::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

fn source() -> Arc<SourceFetcher> {
    Arc::new(SourceFetcher::with_http(http()))
}

/// Serves one request, returning the base URL and the request line received
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let read = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..read]).to_string();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        request.lines().next().unwrap_or_default().to_string()
    });

    (format!("http://{addr}/plugin/"), handle)
}

#[tokio::test]
async fn http_fetcher_reads_body() {
    let (base, server) = serve_once("200 OK", "[]").await;
    let response = http()
        .get(&format!("{base}javascript.json"))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
    assert_eq!(server.await.unwrap(), "GET /plugin/javascript.json HTTP/1.1");
}

#[tokio::test]
async fn loader_maps_http_404() {
    let (base, server) = serve_once("404 Not Found", "missing").await;
    let loader = SnippetLoader::new(source(), "javascript.json");

    let err = loader.load(&base).await.unwrap_err();
    assert!(matches!(err, LoadError::Http { status: 404, .. }));
    assert_eq!(err.to_string(), "Load failed: 404");
    server.await.unwrap();
}

#[tokio::test]
async fn service_loads_from_http_source() {
    let (base, server) = serve_once("200 OK", SAMPLE_SOURCE).await;
    let host = MemoryHost::new();
    let mut service = SnippetService::new(
        ServiceSettings::default(),
        host.ports(),
        source(),
    );

    // Base URL without trailing slash is normalized before fetching
    let state = service.init(base.trim_end_matches('/')).await;
    assert_eq!(state, ServiceState::Ready);
    assert_eq!(host.command_names().len(), SAMPLE_USABLE);
    assert_eq!(server.await.unwrap(), "GET /plugin/javascript.json HTTP/1.1");
}

#[tokio::test]
async fn unreachable_server_degrades_with_init_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let host = MemoryHost::new();
    let mut service = SnippetService::new(ServiceSettings::default(), host.ports(), source());
    let state = service.init(&format!("http://{addr}/")).await;

    assert_eq!(state, ServiceState::Degraded);
    assert!(host.toasts()[0].0.starts_with("Init error: "));
}
