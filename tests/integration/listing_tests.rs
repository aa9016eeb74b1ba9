use burrow::config::Config;
use burrow::discovery::Lister;
use burrow::output::{MemorySink, ProgressEvent};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a minimal Apache-style index page
fn index_page(title: &str, hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| format!("<tr><td><a href=\"{}\">{}</a></td></tr>\n", href, href))
        .collect();
    format!(
        "<html><head><title>Index of {}</title></head><body><h1>Index of {}</h1><table>{}</table></body></html>",
        title, title, rows
    )
}

#[tokio::test]
async fn test_recursive_listing_of_index_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(index_page("/", &["?C=N;O=D", "pub/", "readme.txt"])),
        )
        .mount(&mock_server)
        .await;

    // Linked again from below, still listed only once
    Mock::given(method("GET"))
        .and(path("/pub/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(index_page("/pub", &["../", "app.tar.gz", "nested/"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pub/nested/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(index_page("/pub/nested", &["../", "/pub/"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(MemorySink::new());
    let lister = Arc::new(
        Lister::new(&Config::default(), sink.clone())
            .expect("Failed to build lister"),
    );
    let summary = lister.run(&base_url).await;

    assert_eq!(summary.root, format!("{}/", base_url));
    assert_eq!(summary.directories.len(), 2);
    assert_eq!(summary.files.len(), 3);
    assert!(summary.files.contains(&format!("{}/readme.txt", base_url)));
    assert!(summary.files.contains(&format!("{}/pub/app.tar.gz", base_url)));
    assert!(summary
        .directories
        .contains(&format!("{}/pub/nested/", base_url)));

    let listed: Vec<String> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ProgressEvent::Listing { url, .. } => Some(url),
            _ => None,
        })
        .collect();
    assert_eq!(listed.len(), 3);
    let descents = sink
        .events()
        .iter()
        .filter(|event| matches!(event, ProgressEvent::Descending { .. }))
        .count();
    assert_eq!(descents, 2);
    assert!(sink.events().iter().any(|event| matches!(
        event,
        ProgressEvent::File { name, depth: 1, .. } if name == "app.tar.gz"
    )));
}

#[tokio::test]
async fn test_page_without_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>nothing to see</p>"))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(MemorySink::new());
    let lister = Arc::new(Lister::new(&Config::default(), sink.clone()).unwrap());
    let summary = lister.run(&mock_server.uri()).await;

    assert!(summary.directories.is_empty());
    assert!(summary.files.is_empty());
    assert!(matches!(
        sink.events().last(),
        Some(ProgressEvent::NoLinks { depth: 0, .. })
    ));
}
