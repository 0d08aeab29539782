use crate::config::types::{Config, OutputConfig, ScraperConfig, SiteEntry};
use crate::sites::KNOWN_SITES;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.worker_count < 1 || config.worker_count > 100 {
        return Err(ConfigError::Validation(format!(
            "worker-count must be between 1 and 100, got {}",
            config.worker_count
        )));
    }

    // min_request_interval >= 0 is always true for u64, so no check needed

    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            config.start_page
        )));
    }

    if config.page_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "page-limit must be >= 1, got {}",
            config.page_limit
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target-site entries
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[site]] entry is required".to_string(),
        ));
    }

    for entry in sites {
        if !KNOWN_SITES.contains(&entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown site '{}', known sites: {}",
                entry.name,
                KNOWN_SITES.join(", ")
            )));
        }

        if let Some(base_url) = &entry.base_url {
            Url::parse(base_url).map_err(|e| {
                ConfigError::InvalidUrl(format!(
                    "Invalid base-url '{}' for site '{}': {}",
                    base_url, entry.name, e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            scraper: ScraperConfig {
                worker_count: 5,
                min_request_interval: 1000,
                start_page: 1,
                page_limit: 5,
            },
            output: OutputConfig {
                json_path: "./releases.json".to_string(),
            },
            sites: vec![SiteEntry {
                name: "altraverse".to_string(),
                base_url: None,
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = valid_config();
        config.scraper.worker_count = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let mut config = valid_config();
        config.scraper.page_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let mut config = valid_config();
        config.scraper.start_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_site_rejected() {
        let mut config = valid_config();
        config.sites[0].name = "carlsen".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_sites_rejected() {
        let mut config = valid_config();
        config.sites.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = valid_config();
        config.sites[0].base_url = Some("not a url".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_local_base_url_accepted() {
        let mut config = valid_config();
        config.sites[0].base_url = Some("http://127.0.0.1:8080".to_string());
        assert!(validate(&config).is_ok());
    }
}
