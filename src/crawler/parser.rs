//! HTML link extraction
//!
//! Parses fetched HTML and yields the set of absolute URLs referenced by
//! hyperlinks and embedded resources. Parsing is best-effort: malformed or
//! partial HTML never fails the extractor.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose `href` attribute is followed
const HREF_SELECTOR: &str = "a[href], link[href]";

/// Elements whose `src` attribute is followed
const SRC_SELECTOR: &str = "script[src], img[src], source[src], video[src], audio[src]";

/// Extracts every candidate link from an HTML document
///
/// Collects `href` targets from hyperlinks and `link` elements and `src`
/// targets from scripts, images, and embedded media; strips any in-page
/// fragment suffix; resolves relative references against `base_url`; and
/// returns the deduplicated set of absolute `http`/`https` URLs.
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    collect(&document, HREF_SELECTOR, "href", base_url, &mut links);
    collect(&document, SRC_SELECTOR, "src", base_url, &mut links);

    links
}

fn collect(
    document: &Html,
    selector: &str,
    attribute: &str,
    base_url: &Url,
    links: &mut HashSet<String>,
) {
    // The selectors are static and known-valid; a parse failure just means
    // no links are collected from that group.
    let Ok(selector) = Selector::parse(selector) else {
        return;
    };

    for element in document.select(&selector) {
        if let Some(target) = element.value().attr(attribute) {
            if let Some(absolute) = resolve_link(target, base_url) {
                links.insert(absolute);
            }
        }
    }
}

/// Resolves a raw reference to an absolute URL
///
/// Fragment suffixes are dropped before resolution. Returns `None` for
/// empty, unresolvable, or non-HTTP(S) references.
fn resolve_link(target: &str, base_url: &Url) -> Option<String> {
    // Remove possible in-page navigation from the reference
    let target = target.split('#').next().unwrap_or("").trim();
    if target.is_empty() {
        return None;
    }

    match base_url.join(target) {
        Ok(absolute) if matches!(absolute.scheme(), "http" | "https") => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_anchor() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/other"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_relative_path() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/other"));
    }

    #[test]
    fn test_extract_absolute() {
        let html = r#"<html><body><a href="https://other.com/x">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://other.com/x"));
    }

    #[test]
    fn test_extract_resource_elements() {
        let html = r#"
            <html><head>
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head><body>
                <img src="/logo.png">
                <video src="/clip.mp4"></video>
                <audio src="/sound.ogg"></audio>
                <picture><source src="/pic.webp"></picture>
            </body></html>
        "#;
        let links = extract_links(html, &base_url());
        for expected in [
            "https://example.com/style.css",
            "https://example.com/app.js",
            "https://example.com/logo.png",
            "https://example.com/clip.mp4",
            "https://example.com/sound.ogg",
            "https://example.com/pic.webp",
        ] {
            assert!(links.contains(expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_fragment_is_stripped() {
        let html = r##"<html><body><a href="/doc#section">Link</a></body></html>"##;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/doc"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_fragment_only_reference_dropped() {
        let html = r##"<html><body><a href="#top">Jump</a></body></html>"##;
        let links = extract_links(html, &base_url());
        assert!(links.is_empty());
    }

    #[test]
    fn test_non_http_schemes_dropped() {
        let html = r#"
            <html><body>
                <a href="mailto:me@example.com">Mail</a>
                <a href="javascript:void(0)">JS</a>
                <a href="tel:+123">Call</a>
            </body></html>
        "#;
        let links = extract_links(html, &base_url());
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"
            <html><body>
                <a href="/same">One</a>
                <a href="/same">Two</a>
                <a href="/same#frag">Three</a>
            </body></html>
        "#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_tolerates_malformed_html() {
        let html = "<html><body><a href=\"/ok\">unterminated <div><a href=";
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/ok"));
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_links("", &base_url()).is_empty());
    }
}
