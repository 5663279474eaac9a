//! Crawl progress events and the observer interface they flow through
//!
//! The crawler never writes to the terminal itself; it hands discrete events
//! to a [`CrawlObserver`]. The binary installs [`LogObserver`], which
//! forwards them to `tracing`.

use crate::crawler::FailureKind;

/// A discrete event emitted while a crawl is running
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// One fetch attempt is about to be issued
    FetchAttempt { url: String, attempt: u32 },

    /// All attempts for a URL were spent without success
    FetchGaveUp {
        url: String,
        kind: FailureKind,
        attempts: u32,
    },

    /// A listing item was extracted into a partial record
    ItemExtracted { index: usize, url: String },

    /// A listing item could not be extracted and was skipped
    ItemSkipped { index: usize, reason: String },
}

/// Receiver for crawl events
///
/// Implementations must be thread-safe; the crawler shares one observer
/// between the fetch layer and the coordinator.
pub trait CrawlObserver: Send + Sync {
    fn on_event(&self, event: &CrawlEvent);
}

/// Observer that forwards crawl events to `tracing`
#[derive(Debug, Default)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn on_event(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::FetchAttempt { url, attempt } => {
                tracing::debug!("fetch attempt {} for {}", attempt, url);
            }
            CrawlEvent::FetchGaveUp {
                url,
                kind,
                attempts,
            } => {
                tracing::warn!("giving up on {} after {} attempts: {}", url, attempts, kind);
            }
            CrawlEvent::ItemExtracted { index, url } => {
                tracing::info!("extracted listing item {} -> {}", index + 1, url);
            }
            CrawlEvent::ItemSkipped { index, reason } => {
                tracing::warn!("skipped listing item {}: {}", index + 1, reason);
            }
        }
    }
}
