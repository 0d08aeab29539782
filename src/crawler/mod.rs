//! Crawling engine: fetching, pacing, extraction, and page coordination
//!
//! This module contains the site-independent half of the scraper:
//! - HTTP fetching with retry logic and a bounded response cache
//! - The capability contract every site adapter implements
//! - Per-session dedup state
//! - Request pacing and the bounded extraction pool
//! - The sequential pagination loop

mod adapter;
mod coordinator;
mod fetcher;
mod pool;
mod scheduler;
mod session;

pub use adapter::{ExtractError, SiteAdapter};
pub use coordinator::{ScrapeOptions, Scraper};
pub use fetcher::{FetchClient, FetchConfig, FetchError};
pub use session::CrawlSession;

use crate::catalog::FranchiseMap;
use std::sync::Arc;

/// Runs one complete crawl over a site adapter
///
/// Convenience wrapper over [`Scraper`] for callers that don't need to hold
/// on to the scraper between invocations.
///
/// # Arguments
///
/// * `adapter` - The site to crawl
/// * `options` - Worker cap and request pacing
/// * `start_page` - First listing page, 1-based
/// * `page_limit` - Maximum number of listing pages to walk
pub async fn scrape(
    adapter: Arc<dyn SiteAdapter>,
    options: ScrapeOptions,
    start_page: u32,
    page_limit: u32,
) -> crate::Result<FranchiseMap> {
    Scraper::new(adapter, options)
        .scrape(start_page, page_limit)
        .await
}
