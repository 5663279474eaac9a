//! Crawl coordinator - the two-stage listing/detail orchestration
//!
//! The coordinator drives one crawl:
//! 1. Fetch the listing page; its absence is the only fatal condition
//! 2. Extract a partial record per listing item, skipping malformed items
//!    without affecting their siblings
//! 3. Enrich each record from its detail page behind a politeness delay,
//!    degrading to partial data when a detail page stays unreachable
//! 4. Return the records in listing-page document order

use crate::config::Config;
use crate::crawler::{CrawlEvent, CrawlObserver, FetchOutcome, Fetcher, RequestPolicy};
use crate::extract::{extract, extract_detail, listing_schema, FieldSchema};
use crate::record::PropertyRecord;
use crate::{Result, VerandaError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Selector flagging the listing-item nodes on the summary page
const LISTING_ITEM: &str = r#"li[aria-class="Listing"]"#;

/// Why a single listing item was skipped
#[derive(Debug, Error)]
enum ItemError {
    #[error("listing item has no detail link")]
    MissingLink,

    #[error("invalid detail link: {0}")]
    InvalidLink(#[from] url::ParseError),
}

/// Drives the two-stage crawl against one listing URL
///
/// Generic over the RNG so politeness delays (and, through the fetcher,
/// identity rotation and jitter) are reproducible under test.
pub struct Coordinator<R: Rng = StdRng> {
    listing_url: Url,
    policy: RequestPolicy,
    fetcher: Fetcher<R>,
    rng: R,
    observer: Arc<dyn CrawlObserver>,
}

impl Coordinator<StdRng> {
    /// Creates a coordinator with entropy-seeded RNGs
    pub fn new(config: &Config, observer: Arc<dyn CrawlObserver>) -> Result<Self> {
        Self::with_rngs(
            config,
            observer,
            StdRng::from_entropy(),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> Coordinator<R> {
    /// Creates a coordinator with injected RNGs
    pub fn with_rngs(
        config: &Config,
        observer: Arc<dyn CrawlObserver>,
        fetch_rng: R,
        delay_rng: R,
    ) -> Result<Self> {
        let listing_url = Url::parse(&config.crawl.listing_url)?;
        let fetcher = Fetcher::with_rng(config.fetch.clone(), observer.clone(), fetch_rng)?;

        Ok(Self {
            listing_url,
            policy: config.fetch.clone(),
            fetcher,
            rng: delay_rng,
            observer,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Network calls are strictly sequential: the listing page first, then
    /// each detail page in listing order, each behind a politeness delay.
    /// The returned records keep listing-page document order.
    pub async fn run(&mut self) -> Result<Vec<PropertyRecord>> {
        tracing::info!("fetching listing page {}", self.listing_url);

        let body = match self.fetcher.fetch(self.listing_url.as_str()).await {
            FetchOutcome::Success { body } => body,
            FetchOutcome::Failure { kind, attempts } => {
                return Err(VerandaError::ListingUnreachable { kind, attempts });
            }
        };

        let mut records = self.collect_listing_items(&body);
        tracing::info!(
            "extracted {} partial records from listing page",
            records.len()
        );

        let total = records.len();
        for index in 0..total {
            let delay = self.policy.politeness_delay(&mut self.rng);
            tokio::time::sleep(delay).await;

            let url = records[index].url.clone();
            tracing::debug!("enriching record {}/{} from {}", index + 1, total, url);

            match self.fetcher.fetch(&url).await {
                FetchOutcome::Success { body } => enrich_record(&mut records[index], &body),
                FetchOutcome::Failure { .. } => {
                    // Detail fields stay absent; the give-up was already
                    // reported by the fetcher
                    tracing::debug!("record {}/{} kept partial", index + 1, total);
                }
            }
        }

        Ok(records)
    }

    /// Extracts a partial record per listing item, in document order
    ///
    /// A malformed item (no resolvable detail link) is skipped with an
    /// event; the rest of the page is still processed.
    fn collect_listing_items(&self, body: &str) -> Vec<PropertyRecord> {
        let document = Html::parse_document(body);
        let Ok(item_sel) = Selector::parse(LISTING_ITEM) else {
            return Vec::new();
        };
        let schema = listing_schema();

        let mut records = Vec::new();
        for (index, item) in document.select(&item_sel).enumerate() {
            match listing_record(item, &self.listing_url, &schema) {
                Ok(record) => {
                    self.observer.on_event(&CrawlEvent::ItemExtracted {
                        index,
                        url: record.url.clone(),
                    });
                    records.push(record);
                }
                Err(error) => {
                    self.observer.on_event(&CrawlEvent::ItemSkipped {
                        index,
                        reason: error.to_string(),
                    });
                }
            }
        }
        records
    }
}

/// Builds one partial record from a listing item
fn listing_record(
    item: ElementRef<'_>,
    base: &Url,
    schema: &FieldSchema,
) -> std::result::Result<PropertyRecord, ItemError> {
    let link_sel = Selector::parse("a[href]").map_err(|_| ItemError::MissingLink)?;
    let href = item
        .select(&link_sel)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or(ItemError::MissingLink)?;
    let url = base.join(href)?;

    let mut record = PropertyRecord::new(url.to_string());
    record.apply(&extract(item, schema));
    Ok(record)
}

/// Merges detail-page fields into an existing record
fn enrich_record(record: &mut PropertyRecord, body: &str) {
    let document = Html::parse_document(body);
    record.apply(&extract_detail(document.root_element()));
}
