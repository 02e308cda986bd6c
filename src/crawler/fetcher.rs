//! HTTP fetcher implementation
//!
//! One timed, header-configured GET per page. The fetcher validates status
//! and content type; everything else (extraction, link discovery) happens
//! downstream on the returned body.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANG: &str = "en-US,en;q=0.9";

/// A successfully fetched page, ready for extraction
#[derive(Debug)]
pub struct RawPage {
    /// Final URL after redirects
    pub final_url: String,

    /// Content-Type header value
    pub content_type: String,

    /// Raw HTML body
    pub body: String,
}

/// Per-page fetch failures
///
/// The `Display` strings are recorded verbatim into `CrawlError.error`, so
/// they are part of the output contract.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Not HTML content: {content_type}")]
    NotHtml { content_type: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection refused")]
    Connect,

    #[error("Request cancelled")]
    Cancelled,

    #[error("{0}")]
    Network(String),
}

/// Builds the HTTP client shared by every fetch of a crawler
///
/// Redirects follow reqwest's default policy; the response reports the final
/// URL, which callers use as the base for link resolution.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page
///
/// Sends a GET with the crawler's identification and HTML-preferring accept
/// headers, bounded by `timeout`. Non-2xx statuses and non-HTML content
/// types are errors; no extraction is attempted on them.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<RawPage, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, ACCEPT_HTML)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANG)
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(FetchError::NotHtml { content_type });
    }

    let final_url = response.url().to_string();
    let body = response.text().await.map_err(classify_error)?;

    Ok(RawPage {
        final_url,
        content_type,
        body,
    })
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Network(error.to_string())
    }
}
