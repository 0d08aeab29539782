//! Shinkan main entry point
//!
//! This is the command-line interface for the shinkan release scraper.

use anyhow::{bail, Context};
use clap::Parser;
use shinkan::config::{load_config_with_hash, Config, SiteEntry};
use shinkan::crawler::{FetchClient, ScrapeOptions, Scraper};
use shinkan::{output, sites, FranchiseMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Shinkan: release scraper for manga and light-novel catalogs
///
/// Shinkan walks the configured publisher shops page by page, extracts
/// product records under a worker cap and request pacing, deduplicates them
/// by ISBN, and exports the franchise-grouped result as JSON. Storing the
/// records is the downstream consumer's job.
#[derive(Parser, Debug)]
#[command(name = "shinkan")]
#[command(version = "1.0.0")]
#[command(about = "Release scraper for manga and light-novel catalogs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Crawl only the named site (repeatable); default is every configured site
    #[arg(long = "site", value_name = "NAME")]
    sites: Vec<String>,

    /// Override the configured start page
    #[arg(long, value_name = "N")]
    start_page: Option<u32>,

    /// Override the configured page limit
    #[arg(long = "pages", value_name = "N")]
    page_limit: Option<u32>,

    /// Override the configured JSON output path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let selected = select_sites(&config, &cli.sites)?;

    let start_page = cli.start_page.unwrap_or(config.scraper.start_page);
    let page_limit = cli.page_limit.unwrap_or(config.scraper.page_limit);
    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.json_path));

    if cli.dry_run {
        handle_dry_run(&config, &selected, start_page, page_limit, &output_path);
        return Ok(());
    }

    let options = ScrapeOptions {
        worker_count: config.scraper.worker_count,
        min_request_interval: Duration::from_millis(config.scraper.min_request_interval),
    };

    let mut combined = FranchiseMap::new();
    for entry in &selected {
        tracing::info!(
            "Scraping {} starting at page {} (limit {} pages)",
            entry.name,
            start_page,
            page_limit
        );

        // A fresh fetch client per site run keeps the response cache scoped
        // to one crawl session, like the dedup state inside the scraper.
        let fetch = Arc::new(FetchClient::new()?);
        let adapter = sites::build_adapter(&entry.name, entry.base_url.as_deref(), fetch)?;
        let scraper = Scraper::new(adapter, options.clone());

        let releases = scraper.scrape(start_page, page_limit).await?;
        merge(&mut combined, releases);
    }

    output::write_json(&combined, &output_path)?;
    tracing::info!("Exported releases to {}", output_path.display());

    output::print_summary(&combined);

    Ok(())
}

/// Folds one site's franchise-keyed releases into the combined map, appending
/// each franchise's records in submission order
fn merge(combined: &mut FranchiseMap, releases: FranchiseMap) {
    for (franchise, records) in releases {
        combined.entry(franchise).or_default().extend(records);
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shinkan=info,warn"),
            1 => EnvFilter::new("shinkan=debug,info"),
            2 => EnvFilter::new("shinkan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the `--site` filters against the configured site entries
fn select_sites(config: &Config, filters: &[String]) -> anyhow::Result<Vec<SiteEntry>> {
    if filters.is_empty() {
        return Ok(config.sites.clone());
    }

    let mut selected = Vec::new();
    for name in filters {
        match config.sites.iter().find(|entry| &entry.name == name) {
            Some(entry) => selected.push(entry.clone()),
            None => bail!("site '{}' is not configured", name),
        }
    }

    Ok(selected)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(
    config: &Config,
    selected: &[SiteEntry],
    start_page: u32,
    page_limit: u32,
    output_path: &std::path::Path,
) {
    println!("=== Shinkan Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Workers: {}", config.scraper.worker_count);
    println!(
        "  Min request interval: {}ms",
        config.scraper.min_request_interval
    );
    println!("  Start page: {}", start_page);
    println!("  Page limit: {}", page_limit);

    println!("\nOutput:");
    println!("  JSON: {}", output_path.display());

    println!("\nSites ({}):", selected.len());
    for entry in selected {
        match &entry.base_url {
            Some(base_url) => println!("  - {} ({})", entry.name, base_url),
            None => println!("  - {}", entry.name),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} site(s)", selected.len());
}
