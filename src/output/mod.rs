//! Output: crawl summaries for operators and JSON hand-off for ingestion

mod json;
mod stats;

pub use json::write_json;
pub use stats::print_summary;
