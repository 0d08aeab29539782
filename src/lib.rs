//! Shinkan: a release scraper for manga and light-novel catalog sites
//!
//! This crate implements the crawling engine behind a release tracker: it
//! paginates a publisher's catalog, fetches product pages with retry and
//! backoff, extracts records concurrently under a worker cap and request
//! pacing, deduplicates by ISBN, and groups everything by franchise.
//! Persisting the results is the caller's responsibility.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod sites;

use thiserror::Error;

/// Main error type for shinkan operations
#[derive(Debug, Error)]
pub enum ShinkanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid page range: start-page and page-limit must both be >= 1")]
    InvalidPageRange,

    #[error("Unknown site adapter: {0}")]
    UnknownSite(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for shinkan operations
pub type Result<T> = std::result::Result<T, ShinkanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{FranchiseMap, ProductKind, ProductRecord};
pub use config::Config;
pub use crawler::{CrawlSession, FetchClient, Scraper, ScrapeOptions, SiteAdapter};
