//! Content, metadata, and title extraction from fetched HTML
//!
//! Boilerplate removal runs in two stages: noise subtrees are detached from
//! the parsed tree first, then an ordered list of container selectors is
//! tried, falling back to the whole body text.

use crate::crawler::result::PageMetadata;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Container selectors tried in priority order; the first yielding non-empty
/// text wins
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    ".main-content",
    "#main-content",
    ".content",
    "#content",
    ".post-content",
    ".entry-content",
];

/// Subtrees removed before any text extraction, wherever they appear
const NOISE_SELECTOR: &str = "script, style, nav, header, footer, iframe, noscript";

/// Extractions shorter than this are rejected rather than stored
const MIN_CONTENT_LENGTH: usize = 100;

/// Content extraction failures
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Insufficient content extracted")]
    InsufficientContent,
}

/// Extracts the main textual content of a page
///
/// The page is rejected when the cleaned text is shorter than 100
/// characters; such a page still counts as visited but is recorded as an
/// error, never stored.
pub fn extract_content(html: &str) -> Result<String, ExtractError> {
    let mut document = Html::parse_document(html);
    remove_noise(&mut document);

    let text = select_content(&document);
    let cleaned = collapse_whitespace(&text);

    if cleaned.len() < MIN_CONTENT_LENGTH {
        return Err(ExtractError::InsufficientContent);
    }

    Ok(cleaned)
}

/// Reads page metadata from meta tags; missing fields are omitted
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let description = meta_content(&document, "meta[name=\"description\"]")
        .or_else(|| meta_content(&document, "meta[property=\"og:description\"]"));

    let keywords = meta_content(&document, "meta[name=\"keywords\"]")
        .map(|raw| {
            raw.split(',')
                .map(|keyword| keyword.trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|keywords| !keywords.is_empty());

    let author = meta_content(&document, "meta[name=\"author\"]")
        .or_else(|| meta_content(&document, "meta[property=\"article:author\"]"));

    let published_date = meta_content(&document, "meta[property=\"article:published_time\"]");
    let modified_date = meta_content(&document, "meta[property=\"article:modified_time\"]");

    PageMetadata {
        description,
        keywords,
        author,
        published_date,
        modified_date,
    }
}

/// Page title: `<title>`, else the first `<h1>`, else `"Untitled"`
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);

    first_text(&document, "title")
        .or_else(|| first_text(&document, "h1"))
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Detaches every noise subtree so nested occurrences cannot contribute text
/// to a later-matched container
fn remove_noise(document: &mut Html) {
    let Ok(selector) = Selector::parse(NOISE_SELECTOR) else {
        return;
    };

    let noise: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn select_content(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let text = document
            .select(&selector)
            .map(|element| element_text(&element))
            .collect::<Vec<_>>()
            .join(" ");

        if !text.trim().is_empty() {
            return text;
        }
    }

    // No container matched; fall back to the whole body
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|body| element_text(&body))
        .unwrap_or_default()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Collapses whitespace runs to single spaces and blank-line runs to a
/// single blank line, then trims
fn collapse_whitespace(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(collapsed);
            previous_blank = false;
        }
    }

    lines.join("\n").trim().to_string()
}
