//! Pagesift: a polite site crawler and content extractor
//!
//! Given a seed URL, pagesift discovers same-site pages breadth-first,
//! fetches them one at a time with a politeness delay, strips boilerplate,
//! and returns clean text plus metadata for a downstream ingestion pipeline.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for pagesift operations
#[derive(Debug, Error)]
pub enum PagesiftError {
    /// The seed URL failed normalization. Raised synchronously, before any
    /// network activity; per-page failures are reported through
    /// [`crawler::CrawlResult`] instead.
    #[error("Invalid URL provided")]
    InvalidSeed,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for pagesift operations
pub type Result<T> = std::result::Result<T, PagesiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::CrawlOptions;
pub use crate::crawler::{
    crawl, CancelToken, CrawlError, CrawlResult, CrawlStats, CrawledPage, Crawler, PageMetadata,
};
pub use crate::url::normalize_url;
