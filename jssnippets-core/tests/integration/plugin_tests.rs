//! Tests driving `SnippetService` through host plugin hooks.

use std::fs;
use std::sync::Arc;

use jssnippets_core::host::memory::Insertion;
use jssnippets_core::{
    register_plugin, CompletionContext, MemoryEditor, MemoryHost, PluginContext, ServiceSettings,
    ServiceState, SnippetService, SourceFetcher, DEFAULT_PLUGIN_ID,
};
use tempfile::TempDir;

use crate::fixtures::{CannedFetcher, SAMPLE_SOURCE, SAMPLE_USABLE};

fn plugin_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("javascript.json"), SAMPLE_SOURCE).unwrap();
    dir
}

#[tokio::test]
async fn mount_and_unmount_through_host_hooks() {
    let host = MemoryHost::new();
    let dir = plugin_dir();
    let handle = register_plugin(&*host, SnippetService::with_defaults(host.ports()));

    let base_url = format!("file://{}", dir.path().display());
    assert!(host.mount(DEFAULT_PLUGIN_ID, &base_url, PluginContext::default()).await);

    {
        let service = handle.lock().await;
        assert_eq!(service.state(), ServiceState::Ready);
        assert_eq!(service.base_url(), Some(format!("{base_url}/").as_str()));
    }
    assert_eq!(host.command_names().len(), SAMPLE_USABLE);
    assert_eq!(host.completer_count(), 1);

    assert!(host.unmount(DEFAULT_PLUGIN_ID).await);
    assert_eq!(handle.lock().await.state(), ServiceState::TornDown);
    assert!(host.command_names().is_empty());
    assert_eq!(host.completer_count(), 0);
}

#[tokio::test]
async fn unknown_plugin_id_is_not_mounted() {
    let host = MemoryHost::new();
    assert!(!host.mount("com.example.other", "/", PluginContext::default()).await);
    assert!(!host.unmount("com.example.other").await);
}

#[tokio::test]
async fn missing_source_file_reports_404() {
    let host = MemoryHost::new();
    let dir = TempDir::new().unwrap();
    let mut service = SnippetService::with_defaults(host.ports());

    let state = service.init(&dir.path().display().to_string()).await;
    assert_eq!(state, ServiceState::Degraded);
    let toasts = host.toasts();
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].0.contains("404"));
}

#[tokio::test]
async fn custom_source_file_name() {
    let host = MemoryHost::new();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("snippets.json"), SAMPLE_SOURCE).unwrap();

    let settings = ServiceSettings {
        source_file: "snippets.json".to_string(),
        ..ServiceSettings::default()
    };
    let mut service = SnippetService::new(settings, host.ports(), Arc::new(SourceFetcher::new()));
    assert_eq!(
        service.init(&dir.path().display().to_string()).await,
        ServiceState::Ready
    );
    assert_eq!(service.command_names().len(), SAMPLE_USABLE);
}

#[tokio::test]
async fn palette_and_completion_end_to_end() {
    let host = MemoryHost::new();
    let editor = Arc::new(MemoryEditor::plain());
    host.focus(editor.clone());

    let fetcher = CannedFetcher::new(jssnippets_core::FetchResponse::ok(SAMPLE_SOURCE));
    let mut service = SnippetService::new(ServiceSettings::default(), host.ports(), fetcher.clone());
    service.init("https://cdn.example.com/js-snippets").await;

    assert_eq!(
        fetcher.requested(),
        vec!["https://cdn.example.com/js-snippets/javascript.json".to_string()]
    );
    assert_eq!(
        host.command_names(),
        vec![
            "snippet-clg-0",
            "snippet-imp-1",
            "snippet-afn-2",
            "snippet-for_of-4",
            "snippet-cls-5",
        ]
    );
    assert_eq!(host.command("snippet-clg-0").unwrap().value, "Console log");
    assert_eq!(host.command("snippet-imp-1").unwrap().value, "Insert imp");

    assert!(host.exec("snippet-clg-0"));
    assert_eq!(
        editor.insertions(),
        vec![Insertion::Text("console.log(value);".to_string())]
    );

    let items = host.query(&CompletionContext::new("ace/mode/typescript"), "C");
    let captions: Vec<_> = items.iter().map(|i| i.caption.as_str()).collect();
    assert_eq!(captions, vec!["clg", "cls"]);
    assert_eq!(items[1].score, 1200);

    assert!(host
        .query(&CompletionContext::new("ace/mode/css"), "c")
        .is_empty());
}

#[tokio::test]
async fn blurred_editor_gets_notice_instead_of_text() {
    let host = MemoryHost::new();
    let mut service = SnippetService::new(
        ServiceSettings::default(),
        host.ports(),
        CannedFetcher::new(jssnippets_core::FetchResponse::ok(SAMPLE_SOURCE)),
    );
    service.init("/").await;

    assert!(host.exec("snippet-imp-1"));
    assert_eq!(
        host.toasts(),
        vec![(jssnippets_core::snippet::NO_EDITOR_NOTICE.to_string(), 5000)]
    );
}
