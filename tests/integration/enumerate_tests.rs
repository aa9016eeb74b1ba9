use burrow::config::{Config, HeuristicsConfig, RequestConfig};
use burrow::discovery::{DiscoverySource, Enumerator};
use burrow::output::{MemorySink, ProgressEvent};
use std::sync::Arc;
use wiremock::matchers::{any, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOT_FOUND: &str =
    "<html><head><title>404 Not Found</title></head><body><h1>Not Found</h1></body></html>";

/// Builds an enumerator with a small wordlist so each test controls every probe
fn create_enumerator(
    config: &Config,
    sink: &Arc<MemorySink>,
    words: &[&str],
    max_depth: u32,
) -> Arc<Enumerator> {
    let enumerator = Enumerator::new(config, sink.clone())
        .expect("Failed to build enumerator")
        .with_wordlist(words.iter().map(|w| w.to_string()).collect())
        .with_max_depth(max_depth);
    Arc::new(enumerator)
}

/// Answers every unmatched request with the server's 404 page
async fn mount_not_found(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
        .with_priority(10)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_linked_directory_found_and_baseline_copy_discarded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="admin/">Admin</a><a href="about.html">About</a></body></html>"#,
    )
    .await;

    // Linked, so it is never probed; fetched once as a node
    Mock::given(method("GET"))
        .and(path("/admin/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Admin</title>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Probed once, looks exactly like the 404 page
    Mock::given(method("GET"))
        .and(path("/backup/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
        .expect(1)
        .mount(&mock_server)
        .await;

    // One baseline request for the root node
    Mock::given(method("GET"))
        .and(path_regex(r"^/__burrow_probe_[0-9a-f]+/$"))
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_not_found(&mock_server).await;

    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&Config::default(), &sink, &["admin/", "backup/"], 3)
        .run(&base_url)
        .await;

    let root = format!("{}/", base_url);
    let root_children: Vec<_> = summary.children_of(&root).collect();
    assert_eq!(root_children.len(), 1);
    assert_eq!(root_children[0].entry, "admin/");
    assert_eq!(root_children[0].source, DiscoverySource::Link);
    assert!(sink.confirmed_candidates().is_empty());

    assert_eq!(
        sink.enumerated_urls(),
        vec![root.clone(), format!("{}/admin/", base_url)]
    );
    assert!(sink.events().iter().any(|event| matches!(
        event,
        ProgressEvent::Descending { entry, depth: 0, .. } if entry == "admin/"
    )));
    assert!(sink.events().iter().any(|event| matches!(
        event,
        ProgressEvent::Enumerating { url, depth: 1 } if url == &format!("{}/admin/", base_url)
    )));
}

#[tokio::test]
async fn test_shared_directory_enumerated_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="a/">a</a><a href="b/">b</a>"#).await;
    mount_page(&mock_server, "/a/", r#"<a href="/shared/">shared</a>"#).await;
    mount_page(&mock_server, "/b/", r#"<a href="/shared/">shared</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/shared/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>shared</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_not_found(&mock_server).await;

    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&Config::default(), &sink, &[], 3)
        .run(&base_url)
        .await;

    let shared = format!("{}/shared/", base_url);
    let urls = sink.enumerated_urls();
    assert_eq!(urls.iter().filter(|url| **url == shared).count(), 1);
    assert_eq!(urls.len(), 4);
    assert_eq!(summary.nodes_visited, 4);
}

#[tokio::test]
async fn test_max_depth_zero_explores_root_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="admin/">Admin</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/admin/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Admin</title>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_not_found(&mock_server).await;

    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&Config::default(), &sink, &[], 0)
        .run(&base_url)
        .await;

    assert_eq!(sink.enumerated_urls(), vec![format!("{}/", base_url)]);
    assert_eq!(summary.nodes_visited, 1);
    assert_eq!(summary.directories.len(), 1);
    assert!(!sink
        .events()
        .iter()
        .any(|event| matches!(event, ProgressEvent::Descending { .. })));
}

#[tokio::test]
async fn test_parent_link_to_root_does_not_reenumerate_root() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="admin/">Admin</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/admin/",
        r#"<a href="/">Parent Directory</a><a href="logs/">logs</a>"#,
    )
    .await;
    mount_page(&mock_server, "/admin/logs/", r#"<a href="/admin/">Parent Directory</a>"#).await;

    mount_not_found(&mock_server).await;

    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&Config::default(), &sink, &[], 3)
        .run(&base_url)
        .await;

    assert_eq!(
        summary.visited,
        vec![
            format!("{}/", base_url),
            format!("{}/admin/", base_url),
            format!("{}/admin/logs/", base_url),
        ]
    );
    assert_eq!(summary.nodes_visited, 3);
    assert_eq!(sink.enumerated_urls().len(), 3);
}

#[tokio::test]
async fn test_stricter_threshold_rejects_soft_404() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "<html><body>Welcome</body></html>").await;
    mount_page(
        &mock_server,
        "/backup/",
        "<html><head><title>Index of /backup</title></head><body><h1>Index of /backup</h1></body></html>",
    )
    .await;

    // Soft 404: unknown paths answer 200 with the same error page
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<title>Page Not Found</title>Sorry"),
        )
        .with_priority(10)
        .mount(&mock_server)
        .await;

    let config = Config {
        heuristics: HeuristicsConfig {
            confirm_threshold: 3,
            ..HeuristicsConfig::default()
        },
        ..Config::default()
    };

    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&config, &sink, &["admin/", "backup/"], 1)
        .run(&base_url)
        .await;

    assert_eq!(sink.confirmed_candidates(), vec!["backup/"]);
    let probed: Vec<_> = summary.probed().collect();
    assert_eq!(probed.len(), 1);
    assert!(matches!(
        probed[0].source,
        DiscoverySource::Probe(signals) if signals.score() == 5
    ));
}

#[tokio::test]
async fn test_request_shaping_is_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "BurrowTest/1.0"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_not_found(&mock_server).await;

    let config = Config {
        request: RequestConfig {
            user_agent: "BurrowTest/1.0".to_string(),
            cookies: Some("session=abc".to_string()),
            ..RequestConfig::default()
        },
        ..Config::default()
    };

    let sink = Arc::new(MemorySink::new());
    create_enumerator(&config, &sink, &[], 0)
        .run(&mock_server.uri())
        .await;

    assert!(!sink
        .events()
        .iter()
        .any(|event| matches!(event, ProgressEvent::NoResponse { .. })));
}

#[tokio::test]
async fn test_unreachable_root_is_not_an_error() {
    let sink = Arc::new(MemorySink::new());
    let summary = create_enumerator(&Config::default(), &sink, &["admin/"], 3)
        .run("http://127.0.0.1:9")
        .await;

    assert_eq!(summary.nodes_visited, 1);
    assert!(summary.directories.is_empty());
    assert_eq!(
        sink.events(),
        vec![
            ProgressEvent::Enumerating {
                url: "http://127.0.0.1:9/".to_string(),
                depth: 0,
            },
            ProgressEvent::NoResponse {
                url: "http://127.0.0.1:9/".to_string(),
                depth: 0,
            },
        ]
    );
}
