//! Pagination crawler
//!
//! The coordinator walks listing pages strictly in sequence: all records of
//! page N are merged into the result map before page N+1 is requested. A
//! page yielding no links ends the crawl early, which also absorbs listing
//! fetch failures (the adapter degrades those to an empty page).

use crate::catalog::FranchiseMap;
use crate::crawler::adapter::SiteAdapter;
use crate::crawler::pool::ExtractionPool;
use crate::crawler::scheduler::Pacer;
use crate::crawler::session::CrawlSession;
use crate::{Result, ShinkanError};
use std::sync::Arc;
use std::time::Duration;

/// Tunables for one crawl
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Maximum concurrent detail-page extractions
    pub worker_count: usize,

    /// Minimum delay between consecutive outbound requests
    pub min_request_interval: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            worker_count: 5,
            min_request_interval: Duration::from_secs(1),
        }
    }
}

/// Drives one site adapter through a range of listing pages
pub struct Scraper {
    adapter: Arc<dyn SiteAdapter>,
    options: ScrapeOptions,
}

impl Scraper {
    pub fn new(adapter: Arc<dyn SiteAdapter>, options: ScrapeOptions) -> Self {
        Self { adapter, options }
    }

    /// Crawls up to `page_limit` listing pages starting at `start_page`
    ///
    /// Returns the franchise-keyed record map for this session. Dedup state,
    /// pacing state, and the result map are allocated fresh per call and
    /// never shared across invocations.
    ///
    /// # Arguments
    ///
    /// * `start_page` - First listing page, 1-based
    /// * `page_limit` - Maximum number of pages to walk before stopping
    ///
    /// # Errors
    ///
    /// [`ShinkanError::InvalidPageRange`] when either argument is zero.
    /// Everything below page granularity is contained: unavailable detail
    /// pages, malformed records, and duplicates are logged and skipped.
    pub async fn scrape(&self, start_page: u32, page_limit: u32) -> Result<FranchiseMap> {
        if start_page < 1 || page_limit < 1 {
            return Err(ShinkanError::InvalidPageRange);
        }

        let session = Arc::new(CrawlSession::new());
        let pacer = Arc::new(Pacer::new(self.options.min_request_interval));
        let pool = ExtractionPool::new(self.options.worker_count.max(1), pacer);
        let mut releases = FranchiseMap::new();

        let end_page = start_page.saturating_add(page_limit);
        for page in start_page..end_page {
            let links = self.adapter.listing_links(page).await;
            if links.is_empty() {
                tracing::info!(
                    "{}: page {} yielded no product links, stopping",
                    self.adapter.name(),
                    page
                );
                break;
            }

            tracing::debug!(
                "{}: page {} listed {} products",
                self.adapter.name(),
                page,
                links.len()
            );

            pool.run_page(&self.adapter, &session, links, &mut releases)
                .await;

            tracing::info!("{}: completed page {}", self.adapter.name(), page);
        }

        let total: usize = releases.values().map(Vec::len).sum();
        tracing::info!(
            "{}: crawl finished with {} records across {} franchises",
            self.adapter.name(),
            total,
            releases.len()
        );

        Ok(releases)
    }
}
