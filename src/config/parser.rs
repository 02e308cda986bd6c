use crate::config::types::CrawlOptions;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads crawl options from a TOML file
///
/// Fields absent from the file keep their defaults; the result is validated
/// before it is returned.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pagesift::config::load_options;
///
/// let options = load_options(Path::new("crawl.toml")).unwrap();
/// println!("Max depth: {}", options.max_depth);
/// ```
pub fn load_options(path: &Path) -> Result<CrawlOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let options: CrawlOptions = toml::from_str(&content)?;
    validate(&options)?;
    Ok(options)
}
