//! HTTP fetch client
//!
//! This module handles all HTTP retrieval for the scraper, including:
//! - Building one connection-pooled client per crawl
//! - Retry with exponential backoff for transient failures
//! - Immediate failure for non-retryable statuses
//! - A bounded LRU cache of successful response bodies
//!
//! The cache is a correctness-neutral optimization: a miss behaves exactly
//! like a fresh fetch, and the cache lives and dies with the client instance.

use lru::LruCache;
use reqwest::{Client, StatusCode};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetch failure, already classified by retryability
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or retryable status that survived the retry budget
    #[error("transient failure fetching {url}: {reason}")]
    Transient { url: String, reason: String },

    /// Non-retryable HTTP status, surfaced without retrying
    #[error("permanent failure fetching {url}: HTTP {status}")]
    Permanent { url: String, status: u16 },
}

/// Tunables for the fetch client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout
    pub timeout: Duration,

    /// Retries after the initial attempt for transient failures
    pub max_retries: usize,

    /// First backoff delay; doubles after every failed attempt
    pub backoff_base: Duration,

    /// Response-cache size in entries, least-recently-used eviction
    pub cache_capacity: usize,

    /// Idle connections the pool may keep per host
    pub pool_max_idle_per_host: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            cache_capacity: 1000,
            pool_max_idle_per_host: 100,
        }
    }
}

/// Durable HTTP retrieval with connection reuse and response caching
///
/// One instance is meant to serve exactly one crawl session; the body cache
/// must not outlive the session it was filled by.
pub struct FetchClient {
    client: Client,
    cache: Mutex<LruCache<String, String>>,
    config: FetchConfig,
}

impl FetchClient {
    /// Creates a fetch client with the default configuration
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(FetchConfig::default())
    }

    /// Creates a fetch client with a custom configuration
    pub fn with_config(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(true)
            .brotli(true)
            .build()?;

        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            client,
            cache: Mutex::new(LruCache::new(capacity)),
            config,
        })
    }

    /// Statuses worth retrying: rate limiting and transient server errors
    fn is_retryable_status(status: StatusCode) -> bool {
        matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
    }

    /// Fetches a URL and returns the response body
    ///
    /// Transport errors and retryable statuses are retried up to
    /// `max_retries` times with exponential backoff; any other non-success
    /// status fails immediately. A repeated fetch of the same URL within the
    /// client's lifetime is served from the cache.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.cache.lock().unwrap().get(url) {
            tracing::debug!("Cache hit for {}", url);
            return Ok(body.clone());
        }

        let mut delay = self.config.backoff_base;
        let mut last_reason = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => {
                                self.cache
                                    .lock()
                                    .unwrap()
                                    .put(url.to_string(), body.clone());
                                return Ok(body);
                            }
                            Err(e) => {
                                last_reason = format!("body read failed: {}", e);
                            }
                        }
                    } else if Self::is_retryable_status(status) {
                        last_reason = format!("HTTP {}", status.as_u16());
                    } else {
                        return Err(FetchError::Permanent {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    }
                }
                Err(e) => {
                    last_reason = e.to_string();
                }
            }

            if attempt < self.config.max_retries {
                tracing::warn!(
                    "Fetch of {} failed ({}), attempt {}/{}",
                    url,
                    last_reason,
                    attempt + 1,
                    self.config.max_retries + 1
                );
            }
        }

        Err(FetchError::Transient {
            url: url.to_string(),
            reason: last_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.pool_max_idle_per_host, 100);
    }

    #[test]
    fn test_retryable_status() {
        assert!(FetchClient::is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(FetchClient::is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(FetchClient::is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(FetchClient::is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(FetchClient::is_retryable_status(StatusCode::GATEWAY_TIMEOUT));

        assert!(!FetchClient::is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!FetchClient::is_retryable_status(StatusCode::FORBIDDEN));
        assert!(!FetchClient::is_retryable_status(StatusCode::NOT_IMPLEMENTED));
    }

    #[test]
    fn test_zero_cache_capacity_is_clamped() {
        let client = FetchClient::with_config(FetchConfig {
            cache_capacity: 0,
            ..FetchConfig::default()
        });
        assert!(client.is_ok());
    }
}
