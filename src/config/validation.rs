use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks that the listing URL is a well-formed http(s) URL, that the fetch
/// policy has a usable attempt budget and identity pool, and that every
/// delay interval is ordered.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let listing = Url::parse(&config.crawl.listing_url)
        .map_err(|_| ConfigError::InvalidUrl(config.crawl.listing_url.clone()))?;
    if listing.scheme() != "http" && listing.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(config.crawl.listing_url.clone()));
    }

    let policy = &config.fetch;

    if policy.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "max-attempts must be at least 1".to_string(),
        ));
    }

    if policy.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout-seconds must be at least 1".to_string(),
        ));
    }

    // Backoff must not shrink across attempts
    if policy.base_backoff_seconds < 1.0 {
        return Err(ConfigError::Validation(
            "base-backoff-seconds must be at least 1.0".to_string(),
        ));
    }

    if !policy.jitter_range.is_ordered() {
        return Err(ConfigError::Validation(
            "jitter-range must be [min, max] with 0 <= min <= max".to_string(),
        ));
    }

    if !policy.politeness_delay_range.is_ordered() {
        return Err(ConfigError::Validation(
            "politeness-delay-range must be [min, max] with 0 <= min <= max".to_string(),
        ));
    }

    if policy.identity_pool.is_empty() {
        return Err(ConfigError::Validation(
            "identity-pool must contain at least one entry".to_string(),
        ));
    }

    if policy.identity_pool.iter().any(|id| id.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "identity-pool entries must not be blank".to_string(),
        ));
    }

    if config.output.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
