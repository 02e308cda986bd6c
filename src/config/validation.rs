use crate::config::types::CrawlOptions;
use crate::ConfigError;

/// Validates crawl options before a session starts
///
/// A zero page budget or zero timeout would make every crawl a no-op or an
/// instant failure, so both are rejected up front rather than surfacing as
/// confusing per-page errors.
pub fn validate(options: &CrawlOptions) -> Result<(), ConfigError> {
    if options.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max-pages must be at least 1".to_string(),
        ));
    }

    if options.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be at least 1".to_string(),
        ));
    }

    if options.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    Ok(())
}
