//! Bounded concurrent extraction
//!
//! For each listing page the pool spawns one task per product URL, capped at
//! the configured worker count. Tasks pace their outbound fetches through
//! the shared [`Pacer`](crate::crawler::scheduler::Pacer) and their results
//! are collected in submission order; a failing or panicking task is logged
//! and skipped without cancelling its siblings.

use crate::catalog::FranchiseMap;
use crate::crawler::adapter::{ExtractError, SiteAdapter};
use crate::crawler::scheduler::Pacer;
use crate::crawler::session::CrawlSession;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub(crate) struct ExtractionPool {
    workers: Arc<Semaphore>,
    pacer: Arc<Pacer>,
}

impl ExtractionPool {
    pub(crate) fn new(worker_count: usize, pacer: Arc<Pacer>) -> Self {
        Self {
            workers: Arc::new(Semaphore::new(worker_count)),
            pacer,
        }
    }

    /// Extracts every URL of one listing page and merges the records into
    /// `releases` under their cleaned franchise key
    pub(crate) async fn run_page(
        &self,
        adapter: &Arc<dyn SiteAdapter>,
        session: &Arc<CrawlSession>,
        links: Vec<String>,
        releases: &mut FranchiseMap,
    ) {
        let mut tasks = Vec::with_capacity(links.len());

        for url in links {
            // Dispatch blocks while all workers are busy; the permit travels
            // into the task and frees a slot when the task finishes.
            let Ok(permit) = Arc::clone(&self.workers).acquire_owned().await else {
                break;
            };

            let adapter = Arc::clone(adapter);
            let session = Arc::clone(session);
            let pacer = Arc::clone(&self.pacer);
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                pacer.wait_turn().await;
                adapter.extract_detail(&task_url, &session).await
            });
            tasks.push((url, handle));
        }

        for (url, handle) in tasks {
            match handle.await {
                Ok(Ok(record)) => {
                    tracing::debug!("Extracted {} ({})", record.title, record.isbn);
                    releases
                        .entry(record.franchise_key())
                        .or_default()
                        .push(record);
                }
                Ok(Err(error)) => log_skip(&url, &error),
                Err(join_error) => {
                    tracing::warn!("Extraction task for {} panicked: {}", url, join_error);
                }
            }
        }
    }
}

fn log_skip(url: &str, error: &ExtractError) {
    match error {
        ExtractError::DuplicateIsbn(isbn) => {
            tracing::debug!("Duplicate ISBN {} at {}", isbn, url);
        }
        ExtractError::InvalidIsbn(isbn) => {
            tracing::debug!("Invalid ISBN format '{}' at {}", isbn, url);
        }
        ExtractError::MissingField(field) => {
            tracing::warn!("Missing field `{}` at {}", field, url);
        }
        ExtractError::Unavailable(reason) => {
            tracing::warn!("Skipping {}: {}", url, reason);
        }
    }
}
