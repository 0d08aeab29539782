//! Site adapter capability contract
//!
//! Each target site implements this trait once; the crawler and the
//! extraction pool depend only on the trait, never on a concrete site.

use crate::catalog::ProductRecord;
use crate::crawler::fetcher::FetchError;
use crate::crawler::session::CrawlSession;
use async_trait::async_trait;
use thiserror::Error;

/// Why a single detail page produced no record
///
/// All of these are contained at record granularity: the pool logs the
/// reason and moves on without touching sibling tasks or later pages.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The detail page could not be fetched
    #[error("page unavailable: {0}")]
    Unavailable(#[from] FetchError),

    /// A required field was absent from the markup
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The ISBN slot held something that is not a valid identifier
    #[error("invalid ISBN format: {0}")]
    InvalidIsbn(String),

    /// The identifier was already accepted earlier in this session
    #[error("duplicate ISBN: {0}")]
    DuplicateIsbn(String),
}

/// Capability contract a target site implements once
///
/// Adapters differ only in markup selectors and base URL; everything above
/// this seam is site-independent.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Short site name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Fetches listing page `page` and returns the absolute detail-page URLs
    /// it links to
    ///
    /// An empty vector is the crawl-termination signal, whether it comes
    /// from a fetch failure or a page without product entries.
    async fn listing_links(&self, page: u32) -> Vec<String>;

    /// Fetches one detail page and extracts a canonical record
    ///
    /// The adapter validates the identifier and claims it against `session`
    /// before building the record, so at most one record per ISBN survives a
    /// session.
    async fn extract_detail(
        &self,
        url: &str,
        session: &CrawlSession,
    ) -> Result<ProductRecord, ExtractError>;
}
