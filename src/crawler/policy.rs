//! Request policy: how aggressively and how politely the fetch layer behaves
//!
//! The policy is plain configuration deserialized from the `[fetch]` section
//! of the config file. Every sampling method takes the RNG as an argument so
//! callers can inject a seeded generator and make fetch behavior
//! reproducible under test.

use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

/// Fallback identity if a policy is constructed with an empty pool.
/// Validation rejects such configs; this only guards direct construction.
const FALLBACK_IDENTITY: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A closed interval of seconds, deserialized from a `[min, max]` TOML array
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SecondsRange(pub f64, pub f64);

impl SecondsRange {
    /// Returns true if the interval is non-negative and ordered
    pub fn is_ordered(&self) -> bool {
        self.0 >= 0.0 && self.0 <= self.1
    }

    /// Draws a duration uniformly from the interval
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if !self.is_ordered() {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rng.gen_range(self.0..=self.1))
    }
}

/// Retry, backoff, timeout, and identity-rotation settings for the fetch layer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestPolicy {
    /// Maximum fetch attempts before giving up on a URL
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Base of the exponential backoff, in seconds (`base^attempt`)
    #[serde(rename = "base-backoff-seconds")]
    pub base_backoff_seconds: f64,

    /// Interval of random seconds added to each backoff sleep
    #[serde(rename = "jitter-range")]
    pub jitter_range: SecondsRange,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Client identities (user-agent strings) rotated per attempt
    #[serde(rename = "identity-pool")]
    pub identity_pool: Vec<String>,

    /// Interval of seconds slept before each detail-page fetch
    #[serde(rename = "politeness-delay-range")]
    pub politeness_delay_range: SecondsRange,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_seconds: 2.0,
            jitter_range: SecondsRange(5.0, 10.0),
            timeout_seconds: 30,
            identity_pool: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0".to_string(),
            ],
            politeness_delay_range: SecondsRange(2.0, 5.0),
        }
    }
}

impl RequestPolicy {
    /// Picks a client identity uniformly at random from the pool
    pub fn pick_identity<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        match self.identity_pool.len() {
            0 => FALLBACK_IDENTITY,
            n => &self.identity_pool[rng.gen_range(0..n)],
        }
    }

    /// Computes the sleep before the attempt following `attempt`
    ///
    /// The delay is `base_backoff_seconds^attempt` plus a jitter drawn
    /// uniformly from `jitter_range`. With the jitter interval pinned, the
    /// delay never decreases from one attempt to the next (base >= 1).
    pub fn backoff_delay<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let backoff = self.base_backoff_seconds.powi(attempt as i32);
        let jitter = self.jitter_range.sample(rng);
        Duration::from_secs_f64(backoff) + jitter
    }

    /// Draws a politeness delay for the gap before a detail fetch
    pub fn politeness_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.politeness_delay_range.sample(rng)
    }

    /// Per-request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
