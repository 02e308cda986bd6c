//! Crawler core: fetching, extraction, link discovery, and the BFS session
//!
//! This module contains the crawl pipeline:
//! - HTTP fetching with per-request timeouts
//! - Content, metadata, and title extraction
//! - Link extraction and normalization
//! - The breadth-first session loop with politeness delays

mod extractor;
mod fetcher;
mod parser;
mod result;
mod session;

pub use extractor::{extract_content, extract_metadata, extract_title, ExtractError};
pub use fetcher::{build_http_client, fetch_page, FetchError, RawPage};
pub use parser::extract_links;
pub use result::{CrawlError, CrawlResult, CrawlStats, CrawledPage, PageMetadata};
pub use session::{CancelToken, Crawler};

use crate::config::CrawlOptions;
use crate::Result;

/// Runs a single crawl with the given options
///
/// Convenience wrapper over [`Crawler`]; construct one directly to reuse the
/// HTTP client across several seeds.
///
/// # Example
///
/// ```no_run
/// use pagesift::config::CrawlOptions;
/// use pagesift::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = crawl("https://example.com/docs", CrawlOptions::default()).await?;
/// println!("{} pages extracted", result.stats.successful_pages);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, options: CrawlOptions) -> Result<CrawlResult> {
    Crawler::new(options)?.crawl(seed_url).await
}
