//! JSON export of crawl results
//!
//! The ingestion pipeline consumes the crawl result as JSON; this writes the
//! same payload a library caller would serialize.

use crate::crawler::CrawlResult;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the full crawl result as pretty-printed JSON
pub fn write_json(result: &CrawlResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}
