//! Pagesift command-line interface
//!
//! Thin glue around the crawler core: parse flags, run one crawl, print a
//! summary, and optionally write the JSON hand-off payload.

use anyhow::Context;
use clap::Parser;
use pagesift::config::{load_options, CrawlOptions};
use pagesift::output::{print_summary, write_json};
use pagesift::{CancelToken, Crawler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesift: a polite site crawler and content extractor
///
/// Crawls same-site pages breadth-first from a seed URL, extracts clean text
/// and metadata, and reports per-page failures without aborting the crawl.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "A polite site crawler and content extractor", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    seed: String,

    /// Path to a TOML options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum BFS depth from the seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to store
    #[arg(long)]
    max_pages: Option<usize>,

    /// Follow links to other domains as well
    #[arg(long)]
    all_domains: bool,

    /// Minimum delay between requests in milliseconds
    #[arg(long)]
    rate_limit_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// User-Agent header to send
    #[arg(long)]
    user_agent: Option<String>,

    /// Write the full crawl result as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let options = build_options(&cli)?;
    let crawler = Crawler::new(options)?;

    // Ctrl-C stops the BFS at the next loop iteration and aborts the
    // in-flight request.
    let cancel = CancelToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping crawl");
            signal_token.cancel();
        }
    });

    let result = crawler.crawl_with_cancel(&cli.seed, &cancel).await?;

    print_summary(&result);

    if let Some(path) = &cli.output {
        write_json(&result, path).with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nResult written to: {}", path.display());
    }

    Ok(())
}

/// Merges the options file (or defaults) with command-line overrides
fn build_options(cli: &Cli) -> anyhow::Result<CrawlOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            load_options(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => CrawlOptions::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        options.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        options.max_pages = max_pages;
    }
    if cli.all_domains {
        options.same_domain_only = false;
    }
    if let Some(rate_limit_ms) = cli.rate_limit_ms {
        options.rate_limit_ms = rate_limit_ms;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        options.timeout_ms = timeout_ms;
    }
    if let Some(user_agent) = &cli.user_agent {
        options.user_agent = user_agent.clone();
    }

    Ok(options)
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
