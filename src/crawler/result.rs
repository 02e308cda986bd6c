//! The crawl output contract handed to the ingestion pipeline
//!
//! Everything here serializes to JSON: `pages[].content` feeds chunking and
//! embedding, `url`/`title`/`metadata` are stored as provenance, and
//! `stats`/`errors` surface to the operator as a crawl summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata scraped from a page's meta tags; every field is optional and an
/// absent tag is never an error
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
}

/// One successfully crawled page
///
/// `content` is always at least 100 characters; shorter extractions are
/// recorded as errors instead of pages.
#[derive(Debug, Clone, Serialize)]
pub struct CrawledPage {
    pub url: String,
    pub title: String,
    pub content: String,
    pub metadata: PageMetadata,
    pub depth: u32,
    pub timestamp: DateTime<Utc>,
}

/// One failed URL and the message describing why
#[derive(Debug, Clone, Serialize)]
pub struct CrawlError {
    pub url: String,
    pub error: String,
}

/// Aggregate counters for a finished session
///
/// `total_pages` counts visited URLs, and
/// `total_pages == successful_pages + failed_pages + skipped_pages` always
/// holds.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub total_pages: usize,
    pub successful_pages: usize,
    pub failed_pages: usize,
    pub skipped_pages: usize,
    pub crawl_duration_ms: u64,
}

/// Everything a crawl produces: pages, per-URL errors, and stats
///
/// Handed to the caller by value; the session that built it is gone by the
/// time the caller sees it.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub pages: Vec<CrawledPage>,
    pub errors: Vec<CrawlError>,
    pub stats: CrawlStats,
}
