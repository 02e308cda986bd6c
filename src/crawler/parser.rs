//! Link extraction from fetched HTML

use crate::url::normalize_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts every crawlable link from a page
///
/// Each `a[href]` is resolved against `base_url`, normalized, and
/// deduplicated. Malformed and non-navigational hrefs are skipped silently.
/// Links come back in discovery order, but callers re-impose BFS order at
/// enqueue time anyway.
pub fn extract_links(base_url: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            let resolved = match resolve_href(base_url, href) {
                Some(resolved) => resolved,
                None => continue,
            };

            // Normalization also drops non-http(s) schemes
            let normalized = match normalize_url(resolved.as_str()) {
                Ok(normalized) => normalized,
                Err(_) => continue,
            };

            if seen.insert(normalized.to_string()) {
                links.push(normalized);
            }
        }
    }

    links
}

/// Resolves an href against the page URL
///
/// Returns None for hrefs that never lead to a page: empty strings,
/// same-page fragments, javascript/mailto/tel pseudo-links, data URIs, and
/// anything the URL parser rejects.
fn resolve_href(base_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}
