//! Per-invocation crawl state

use std::collections::HashSet;
use std::sync::Mutex;

/// Ephemeral state for one crawl invocation
///
/// Holds the set of ISBNs already accepted this session. A fresh session is
/// allocated per `scrape` call and discarded afterwards; sharing one across
/// invocations would let dedup state leak between crawls.
pub struct CrawlSession {
    seen_isbns: Mutex<HashSet<String>>,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self {
            seen_isbns: Mutex::new(HashSet::new()),
        }
    }

    /// Claims an ISBN for this session
    ///
    /// Check and insert happen under one lock, so exactly one task wins per
    /// identifier; every later claim of the same ISBN returns false.
    pub fn claim_isbn(&self, isbn: &str) -> bool {
        self.seen_isbns.lock().unwrap().insert(isbn.to_string())
    }
}

impl Default for CrawlSession {
    fn default() -> Self {
        Self::new()
    }
}
