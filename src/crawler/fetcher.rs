//! HTTP fetcher implementation
//!
//! This module performs the logical fetches for the crawler:
//! - Building an HTTP client with the policy timeout
//! - Rotating the client identity on every attempt
//! - Retrying timeouts, transport errors, and non-2xx statuses with
//!   exponential backoff plus jitter
//! - Classifying failures into a small typed taxonomy

use crate::crawler::{CrawlEvent, CrawlObserver, RequestPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::{header, Client};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result of one fetch attempt sequence
#[derive(Debug)]
pub enum FetchOutcome {
    /// A 2xx response; the body was read fully
    Success { body: String },

    /// Every attempt in the budget failed; `kind` is the last failure seen
    Failure { kind: FailureKind, attempts: u32 },
}

/// Classification of a single failed attempt
///
/// All kinds are retried identically up to the attempt budget; the
/// distinction only matters for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("request timeout")]
    Timeout,

    #[error("transport error")]
    Transport,

    #[error("HTTP status {0}")]
    Status(u16),
}

/// Builds an HTTP client configured from the request policy
///
/// The client carries no default user agent; the fetcher sets the rotated
/// identity per request.
pub fn build_http_client(policy: &RequestPolicy) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(policy.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs logical fetches with retries, rotation, and backoff
///
/// Generic over the RNG so tests can seed identity rotation and jitter.
/// Holds no state across calls beyond the shared client connection pool.
pub struct Fetcher<R: Rng = StdRng> {
    client: Client,
    policy: RequestPolicy,
    observer: Arc<dyn CrawlObserver>,
    rng: R,
}

impl Fetcher<StdRng> {
    /// Creates a fetcher with an entropy-seeded RNG
    pub fn new(
        policy: RequestPolicy,
        observer: Arc<dyn CrawlObserver>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_rng(policy, observer, StdRng::from_entropy())
    }
}

impl<R: Rng> Fetcher<R> {
    /// Creates a fetcher with an injected RNG
    pub fn with_rng(
        policy: RequestPolicy,
        observer: Arc<dyn CrawlObserver>,
        rng: R,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&policy)?;
        Ok(Self {
            client,
            policy,
            observer,
            rng,
        })
    }

    /// The policy this fetcher was built with
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Fetches a URL, retrying up to the attempt budget
    ///
    /// Each attempt picks a fresh identity from the pool. A 2xx response
    /// returns immediately with the full body. Any timeout, transport error,
    /// or non-2xx status counts one attempt; if attempts remain the fetcher
    /// sleeps `base^attempt + jitter` before the next one. Every attempt and
    /// the final give-up are reported to the observer.
    pub async fn fetch(&mut self, url: &str) -> FetchOutcome {
        let mut last_kind = FailureKind::Transport;

        for attempt in 1..=self.policy.max_attempts {
            self.observer.on_event(&CrawlEvent::FetchAttempt {
                url: url.to_string(),
                attempt,
            });

            let identity = self.policy.pick_identity(&mut self.rng).to_string();

            match self.attempt(url, &identity).await {
                Ok(body) => return FetchOutcome::Success { body },
                Err(kind) => {
                    tracing::debug!("attempt {} for {} failed: {}", attempt, url, kind);
                    last_kind = kind;

                    if attempt < self.policy.max_attempts {
                        let delay = self.policy.backoff_delay(attempt, &mut self.rng);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        self.observer.on_event(&CrawlEvent::FetchGaveUp {
            url: url.to_string(),
            kind: last_kind,
            attempts: self.policy.max_attempts,
        });

        FetchOutcome::Failure {
            kind: last_kind,
            attempts: self.policy.max_attempts,
        }
    }

    /// Issues one GET and reads the body fully
    async fn attempt(&self, url: &str, identity: &str) -> Result<String, FailureKind> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, identity)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureKind::Status(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

/// Maps a reqwest error onto the failure taxonomy
fn classify(error: reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let policy = RequestPolicy::default();
        assert!(build_http_client(&policy).is_ok());
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Timeout.to_string(), "request timeout");
        assert_eq!(FailureKind::Transport.to_string(), "transport error");
        assert_eq!(FailureKind::Status(503).to_string(), "HTTP status 503");
    }

    // Retry behavior against a live server is covered by the wiremock
    // integration tests.
}
