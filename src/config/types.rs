use serde::Deserialize;

/// Main configuration structure for shinkan
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of concurrent detail-page extractions
    #[serde(rename = "worker-count", default = "default_worker_count")]
    pub worker_count: usize,

    /// Minimum time between outbound requests (milliseconds)
    #[serde(rename = "min-request-interval", default = "default_min_request_interval")]
    pub min_request_interval: u64,

    /// First listing page to crawl (1-based)
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Maximum number of listing pages per site
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the franchise map is exported to as JSON
    #[serde(rename = "json-path")]
    pub json_path: String,
}

/// One target site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Adapter name (see `sites::KNOWN_SITES`)
    pub name: String,

    /// Optional base-URL override (mirror, staging, local test server)
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
}

fn default_worker_count() -> usize {
    5
}

fn default_min_request_interval() -> u64 {
    1000
}

fn default_start_page() -> u32 {
    1
}

fn default_page_limit() -> u32 {
    5
}
