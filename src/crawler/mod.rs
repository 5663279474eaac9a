//! Crawler module containing the fetch layer and crawl orchestration
//!
//! This module contains:
//! - Request policy: retry budget, backoff shape, identity rotation
//! - Fetcher: one logical fetch with retries and typed failures
//! - Events: the observer interface crawl progress is reported through
//! - Coordinator: the two-stage listing/detail orchestration

mod coordinator;
mod events;
mod fetcher;
mod policy;

pub use coordinator::Coordinator;
pub use events::{CrawlEvent, CrawlObserver, LogObserver};
pub use fetcher::{build_http_client, FailureKind, FetchOutcome, Fetcher};
pub use policy::{RequestPolicy, SecondsRange};
