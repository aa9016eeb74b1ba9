//! HTML parser for extracting links and probe metadata
//!
//! This module handles parsing HTML content to extract:
//! - Anchor targets, verbatim and in document order
//! - The page title
//! - `<meta http-equiv="refresh">` targets

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from <title> tag), trimmed
    pub title: Option<String>,

    /// `href` of every `<a>` element, unresolved
    pub links: Vec<String>,

    /// Target URL of every meta refresh, unresolved
    pub refresh_targets: Vec<String>,
}

/// Parses HTML content and extracts links and metadata
///
/// Parsing is HTML5-lenient: malformed markup yields fewer matches, never an
/// error. Only `<a href>` counts as a link; `<script>`, `<img>` and `<link>`
/// references are ignored because discovery follows directory-listing style
/// anchors only. Tag and attribute names match case-insensitively.
///
/// # Example
///
/// ```
/// use burrow::discovery::parse_html;
///
/// let html = r#"<HTML><TITLE>Index of /</TITLE><A HREF="admin/">admin</A></HTML>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title.as_deref(), Some("Index of /"));
/// assert_eq!(parsed.links, vec!["admin/"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    if html.is_empty() {
        return ParsedPage::default();
    }

    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_anchors(&document),
        refresh_targets: extract_refresh_targets(&document),
    }
}

/// Convenience function returning only the anchor targets of a document
pub fn extract_links(html: &str) -> Vec<String> {
    parse_html(html).links
}

/// Returns true if `href` names a subdirectory of the current page
///
/// Subdirectory links end in `/`; the self (`./`) and parent (`../`)
/// references of directory listings are excluded.
pub fn is_subdirectory_link(href: &str) -> bool {
    !href.is_empty() && href != "./" && href != "../" && href.ends_with('/')
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the `href` of every anchor, in document order
fn extract_anchors(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Extracts the target of every `<meta http-equiv="refresh">`
///
/// A refresh without a `url=` part reloads the page itself and yields nothing.
fn extract_refresh_targets(document: &Html) -> Vec<String> {
    let Ok(meta_selector) = Selector::parse("meta[http-equiv][content]") else {
        return Vec::new();
    };

    document
        .select(&meta_selector)
        .filter(|element| {
            element
                .value()
                .attr("http-equiv")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("refresh"))
        })
        .filter_map(|element| element.value().attr("content"))
        .filter_map(refresh_target)
        .collect()
}

/// Pulls the URL out of a refresh `content` value such as `0; url='/home'`
fn refresh_target(content: &str) -> Option<String> {
    content.split(';').skip(1).find_map(|part| {
        let part = part.trim();
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("url") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '\'' || c == '"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let parsed = parse_html("<html><head><title>  Index of /files  </title></head></html>");
        assert_eq!(parsed.title, Some("Index of /files".to_string()));
    }

    #[test]
    fn test_no_title() {
        let parsed = parse_html("<html><head></head><body></body></html>");
        assert_eq!(parsed.title, None);

        let parsed = parse_html("<html><head><title>   </title></head></html>");
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_links_in_document_order() {
        let html = r#"
            <html><body>
                <a href="../">Parent Directory</a>
                <a href="zeta/">zeta/</a>
                <a href="alpha/">alpha/</a>
                <a href="notes.txt">notes.txt</a>
            </body></html>
        "#;
        assert_eq!(
            extract_links(html),
            vec!["../", "zeta/", "alpha/", "notes.txt"]
        );
    }

    #[test]
    fn test_links_ignore_other_attributes_and_case() {
        let html = r#"<A CLASS="dir" HREF="upper/" id="x">u</A><a target="_blank" href="lower/">l</a>"#;
        assert_eq!(extract_links(html), vec!["upper/", "lower/"]);
    }

    #[test]
    fn test_non_anchor_references_ignored() {
        let html = r#"
            <link rel="stylesheet" href="css/">
            <script src="js/app.js"></script>
            <img src="images/">
            <a name="no-href">anchor without href</a>
        "#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert!(extract_links("").is_empty());
        assert_eq!(parse_html(""), ParsedPage::default());

        let html = r#"<a href="open/"><div><a href="second/"</p>"#;
        let links = extract_links(html);
        assert!(links.contains(&"open/".to_string()));
    }

    #[test]
    fn test_is_subdirectory_link() {
        assert!(is_subdirectory_link("admin/"));
        assert!(is_subdirectory_link("/root-relative/"));
        assert!(is_subdirectory_link("http://a.com/x/"));

        assert!(!is_subdirectory_link(""));
        assert!(!is_subdirectory_link("./"));
        assert!(!is_subdirectory_link("../"));
        assert!(!is_subdirectory_link("file.txt"));
        assert!(!is_subdirectory_link("?C=N;O=D"));
    }

    #[test]
    fn test_refresh_targets() {
        let html = r#"<html><head>
            <meta http-equiv="Refresh" content="0; URL='http://a.com/'">
            <meta http-equiv="refresh" content="5">
            <meta http-equiv="content-type" content="text/html; url=nope">
        </head></html>"#;
        assert_eq!(parse_html(html).refresh_targets, vec!["http://a.com/"]);
    }

    #[test]
    fn test_refresh_target_forms() {
        assert_eq!(refresh_target("0;url=/home"), Some("/home".to_string()));
        assert_eq!(refresh_target("3; URL=\"x/\""), Some("x/".to_string()));
        assert_eq!(refresh_target("0"), None);
        assert_eq!(refresh_target("0; url="), None);
    }
}
