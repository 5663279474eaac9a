//! Veranda: a resilient property-listing harvester
//!
//! This crate crawls a real-estate listing site in two stages — a summary
//! listing page and per-property detail pages — and merges both views into
//! structured property records, tolerating timeouts, transient errors, and
//! missing markup along the way.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

use crawler::FailureKind;

/// Main error type for Veranda operations
#[derive(Debug, Error)]
pub enum VerandaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Listing page unreachable after {attempts} attempts: {kind}")]
    ListingUnreachable { kind: FailureKind, attempts: u32 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Veranda operations
pub type Result<T> = std::result::Result<T, VerandaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlEvent, CrawlObserver, FetchOutcome, Fetcher, RequestPolicy};
pub use record::PropertyRecord;
