//! Crawl summary rendering

use crate::crawler::CrawlResult;

/// Prints a human-readable summary of a finished crawl to stdout
pub fn print_summary(result: &CrawlResult) {
    let stats = &result.stats;

    println!("=== Crawl Summary ===\n");
    println!("Overview:");
    println!("  URLs visited: {}", stats.total_pages);
    println!("  Pages stored: {}", stats.successful_pages);
    println!("  Pages failed: {}", stats.failed_pages);
    println!("  Pages skipped: {}", stats.skipped_pages);
    println!("  Duration: {} ms", stats.crawl_duration_ms);

    if !result.pages.is_empty() {
        println!("\nPages:");
        for page in &result.pages {
            println!(
                "  [depth {}] {} ({} chars) {}",
                page.depth,
                page.url,
                page.content.len(),
                page.title
            );
        }
    }

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  {}: {}", error.url, error.error);
        }
    }
}
