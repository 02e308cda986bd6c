use serde::Deserialize;

/// Options for one crawl session, supplied once and never mutated.
///
/// Every field has a default, so a TOML options file (or a caller building
/// the struct) only needs to name the fields it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlOptions {
    /// Maximum BFS depth from the seed; the seed itself is depth 0
    pub max_depth: u32,

    /// Hard cap on pages accepted into the result
    pub max_pages: usize,

    /// Restrict discovered links to the seed's hostname
    pub same_domain_only: bool,

    /// Declared but not consulted: the fetch and filter paths currently do
    /// not retrieve or match robots.txt. The flag is accepted so callers can
    /// state intent ahead of enforcement.
    pub respect_robots_txt: bool,

    /// Minimum spacing between fetch attempts (milliseconds)
    pub rate_limit_ms: u64,

    /// Per-request timeout (milliseconds)
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 100,
            same_domain_only: true,
            respect_robots_txt: true,
            rate_limit_ms: 1000,
            timeout_ms: 30_000,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("pagesift/{}", env!("CARGO_PKG_VERSION"))
}
