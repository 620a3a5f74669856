//! HTML parser for extracting same-domain links
//!
//! Every `<a href="...">` is resolved against the page URL; only links whose
//! authority equals the crawl's base domain are kept.

use crate::url::authority;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the same-domain absolute links reachable from a page
///
/// # Arguments
///
/// * `page_url` - The URL the HTML was fetched from, used to resolve relative links
/// * `html` - The page content
/// * `base_domain` - The authority (`host[:port]`) links must match exactly
///
/// # Returns
///
/// The absolute URLs in document order, each kept at its first occurrence.
/// Hrefs that fail to resolve are dropped individually; an unparsable
/// `page_url` yields no links.
///
/// # Example
///
/// ```
/// use mail_ripple::crawler::extract_links;
///
/// let html = r#"<a href="https://example.com/a">A</a>
///               <a href="https://other.com/b">B</a>
///               <a href="/c">C</a>"#;
/// let links = extract_links("http://example.com/", html, "example.com");
/// assert_eq!(links, vec!["https://example.com/a", "http://example.com/c"]);
/// ```
pub fn extract_links(page_url: &str, html: &str, base_domain: &str) -> Vec<String> {
    let base_url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, &base_url, base_domain) {
                    if seen.insert(absolute_url.clone()) {
                        links.push(absolute_url);
                    }
                }
            }
        }
    }

    links
}

/// Resolves an href and keeps it only when it stays on `base_domain`
///
/// Hostless schemes (`javascript:`, `mailto:`, `tel:`, `data:`) have no
/// authority and are rejected by the same comparison.
fn resolve_link(href: &str, base_url: &Url, base_domain: &str) -> Option<String> {
    let absolute_url = base_url.join(href.trim()).ok()?;
    match authority(&absolute_url) {
        Some(host) if host == base_domain => Some(absolute_url.to_string()),
        _ => None,
    }
}
