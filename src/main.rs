//! Veranda main entry point
//!
//! This is the command-line interface for the Veranda property-listing
//! harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use veranda::config::load_config_with_hash;
use veranda::crawler::LogObserver;
use veranda::output::{CsvSink, OutputSink};
use veranda::{Coordinator, VerandaError};

/// Veranda: a resilient property-listing harvester
///
/// Veranda crawls a real-estate listing page and each property's detail
/// page, merges both views into one record per property, and writes the
/// results to CSV.
#[derive(Parser, Debug)]
#[command(name = "veranda")]
#[command(version = "0.1.0")]
#[command(about = "A resilient property-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("veranda=info,warn"),
            1 => EnvFilter::new("veranda=debug,info"),
            2 => EnvFilter::new("veranda=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &veranda::Config) {
    println!("=== Veranda Dry Run ===\n");

    println!("Crawl:");
    println!("  Listing URL: {}", config.crawl.listing_url);

    println!("\nFetch policy:");
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!(
        "  Backoff: {}^attempt + jitter in [{}, {}] s",
        config.fetch.base_backoff_seconds,
        config.fetch.jitter_range.0,
        config.fetch.jitter_range.1
    );
    println!("  Timeout: {}s", config.fetch.timeout_seconds);
    println!(
        "  Politeness delay: [{}, {}] s",
        config.fetch.politeness_delay_range.0, config.fetch.politeness_delay_range.1
    );

    println!("\nIdentity pool ({}):", config.fetch.identity_pool.len());
    for identity in &config.fetch.identity_pool {
        println!("  - {}", identity);
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: veranda::Config) -> anyhow::Result<()> {
    let observer = Arc::new(LogObserver);
    let csv_path = config.output.csv_path.clone();

    let mut coordinator = Coordinator::new(&config, observer)?;

    match coordinator.run().await {
        Ok(records) => {
            tracing::info!("Crawl completed: {} records harvested", records.len());

            let mut sink = CsvSink::new(&csv_path);
            sink.write(&records)
                .with_context(|| format!("failed to write {}", csv_path))?;

            tracing::info!("Records written to {}", csv_path);
            Ok(())
        }
        Err(error @ VerandaError::ListingUnreachable { .. }) => {
            tracing::error!("Crawl aborted with zero records: {}", error);
            Err(error.into())
        }
        Err(error) => {
            tracing::error!("Crawl failed: {}", error);
            Err(error.into())
        }
    }
}
