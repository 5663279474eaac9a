use serde::Deserialize;

use crate::crawler::RequestPolicy;

/// Main configuration structure for Veranda
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub fetch: RequestPolicy,
    pub output: OutputConfig,
}

/// Crawl target configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The listing page to enumerate; detail links are resolved against it
    #[serde(rename = "listing-url")]
    pub listing_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file records are written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}
