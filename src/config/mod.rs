//! Configuration module for shinkan
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use shinkan::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling up to {} pages per site", config.scraper.page_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig, SiteEntry};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
