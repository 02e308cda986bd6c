//! Crawl session and frontier controller
//!
//! One [`Crawler`] holds the immutable options and the HTTP client; all
//! mutable crawl state lives in a session value scoped to a single `crawl`
//! call. That keeps the crawler reentrant: independent crawls can run
//! concurrently against the same instance.
//!
//! Fetching is strictly sequential. Parallel requests would defeat the
//! politeness delay, so the only suspension points are the fetch itself and
//! the inter-request sleep.

use crate::config::{validate, CrawlOptions};
use crate::crawler::extractor::{extract_content, extract_metadata, extract_title};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchError};
use crate::crawler::parser::extract_links;
use crate::crawler::result::{CrawlError, CrawlResult, CrawlStats, CrawledPage};
use crate::url::{normalize_url, should_crawl};
use crate::{PagesiftError, Result};
use chrono::Utc;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use url::Url;

/// Cooperative cancellation handle for running crawls
///
/// `cancel` stops the BFS loop at the top of its next iteration and aborts
/// an in-flight fetch or politeness sleep immediately. Clones are cheap and
/// observe the same flag.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Signals cancellation to every clone of this token
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        loop {
            if *receiver.borrow() {
                return;
            }
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit of frontier work: a normalized URL and its BFS depth
#[derive(Debug, Clone)]
struct QueueEntry {
    url: Url,
    depth: u32,
}

/// Mutable state for one crawl invocation, discarded on return
///
/// The frontier is a plain FIFO queue with a set-based dedup index; URLs
/// only ever need forward discovery, never back-references.
struct CrawlSession {
    visited: HashSet<String>,
    queue: VecDeque<QueueEntry>,
    pages: Vec<CrawledPage>,
    errors: Vec<CrawlError>,
    started: Instant,
}

impl CrawlSession {
    fn new(seed: Url) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(QueueEntry {
            url: seed,
            depth: 0,
        });

        Self {
            visited: HashSet::new(),
            queue,
            pages: Vec::new(),
            errors: Vec::new(),
            started: Instant::now(),
        }
    }

    fn record_error(&mut self, url: String, error: impl fmt::Display) {
        self.errors.push(CrawlError {
            url,
            error: error.to_string(),
        });
    }

    fn finish(self) -> CrawlResult {
        let total_pages = self.visited.len();
        let successful_pages = self.pages.len();
        let failed_pages = self.errors.len();
        let skipped_pages = total_pages.saturating_sub(successful_pages + failed_pages);

        CrawlResult {
            pages: self.pages,
            errors: self.errors,
            stats: CrawlStats {
                total_pages,
                successful_pages,
                failed_pages,
                skipped_pages,
                crawl_duration_ms: self.started.elapsed().as_millis() as u64,
            },
        }
    }
}

/// A reusable crawler: immutable options plus a shared HTTP client
pub struct Crawler {
    options: CrawlOptions,
    client: Client,
}

impl Crawler {
    /// Validates the options and builds the HTTP client
    pub fn new(options: CrawlOptions) -> Result<Self> {
        validate(&options)?;
        let client = build_http_client()?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawls breadth-first from `seed_url` until the frontier drains or the
    /// page cap is reached
    ///
    /// Per-URL failures are recorded in the result and never abort the
    /// session; the only fatal error is a seed that fails normalization,
    /// raised before any network activity.
    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlResult> {
        self.crawl_with_cancel(seed_url, &CancelToken::new()).await
    }

    /// Crawl variant that stops promptly when `cancel` fires
    pub async fn crawl_with_cancel(
        &self,
        seed_url: &str,
        cancel: &CancelToken,
    ) -> Result<CrawlResult> {
        let seed = normalize_url(seed_url).map_err(|_| PagesiftError::InvalidSeed)?;
        let seed_host = seed
            .host_str()
            .ok_or(PagesiftError::InvalidSeed)?
            .to_string();

        tracing::info!("Starting crawl from {}", seed);

        let timeout = Duration::from_millis(self.options.timeout_ms);
        let delay = Duration::from_millis(self.options.rate_limit_ms);
        let mut session = CrawlSession::new(seed);
        let mut attempts: u64 = 0;

        while session.pages.len() < self.options.max_pages {
            if cancel.is_cancelled() {
                tracing::info!(
                    "Crawl cancelled with {} URLs still queued",
                    session.queue.len()
                );
                break;
            }

            let entry = match session.queue.pop_front() {
                Some(entry) => entry,
                None => break,
            };
            let url_key = entry.url.to_string();

            // The same URL may be enqueued more than once before its first
            // dequeue; dedup happens here, not at enqueue time.
            if session.visited.contains(&url_key) {
                continue;
            }

            // Depth-exceeded entries are skipped: not visited, not fetched.
            if entry.depth > self.options.max_depth {
                continue;
            }

            // Visited even if the fetch fails, so the URL is never retried
            // within this session.
            session.visited.insert(url_key.clone());

            // Politeness delay between attempts. Gated on attempt count
            // rather than stored pages so a run of failures stays throttled.
            if attempts > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = cancel.cancelled() => continue,
                }
            }
            attempts += 1;

            tracing::debug!("Fetching {} (depth {})", url_key, entry.depth);

            let fetched = tokio::select! {
                fetched = fetch_page(
                    &self.client,
                    entry.url.as_str(),
                    timeout,
                    &self.options.user_agent,
                ) => fetched,
                _ = cancel.cancelled() => Err(FetchError::Cancelled),
            };

            let raw = match fetched {
                Ok(raw) => raw,
                Err(error) => {
                    tracing::warn!("Fetch failed for {}: {}", url_key, error);
                    session.record_error(url_key, error);
                    continue;
                }
            };

            let content = match extract_content(&raw.body) {
                Ok(content) => content,
                Err(error) => {
                    tracing::warn!("Extraction failed for {}: {}", url_key, error);
                    session.record_error(url_key, error);
                    continue;
                }
            };

            let title = extract_title(&raw.body);
            let metadata = extract_metadata(&raw.body);

            session.pages.push(CrawledPage {
                url: url_key,
                title,
                content,
                metadata,
                depth: entry.depth,
                timestamp: Utc::now(),
            });

            if entry.depth < self.options.max_depth {
                // Redirects may have moved the page; resolve links against
                // where the body actually came from.
                let base = Url::parse(&raw.final_url).unwrap_or_else(|_| entry.url.clone());

                for link in extract_links(&base, &raw.body) {
                    if !should_crawl(&link, &seed_host, self.options.same_domain_only) {
                        continue;
                    }
                    if session.visited.contains(link.as_str()) {
                        continue;
                    }
                    session.queue.push_back(QueueEntry {
                        url: link,
                        depth: entry.depth + 1,
                    });
                }
            }
        }

        let result = session.finish();
        tracing::info!(
            "Crawl finished: {} pages, {} errors, {} visited in {} ms",
            result.stats.successful_pages,
            result.stats.failed_pages,
            result.stats.total_pages,
            result.stats.crawl_duration_ms
        );

        Ok(result)
    }
}
