//! Yelpscrap main entry point
//!
//! This is the command-line interface for the yelpscrap business-listing
//! scraper.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yelpscrap::config::{load_config, Config};
use yelpscrap::output::{default_workbook_path, export_workbook, query_summary};
use yelpscrap::scraper::Scraper;

/// Yelpscrap: a polite business-listing scraper
///
/// Yelpscrap browses paginated Yelp-style search results for a configured
/// set of category filters, deduplicates the discovered shops, and exports
/// them to an XLSX workbook.
#[derive(Parser, Debug)]
#[command(name = "yelpscrap")]
#[command(version = "0.1.0")]
#[command(about = "A polite business-listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
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
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else {
        handle_scrape(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("yelpscrap=info,warn"),
            1 => EnvFilter::new("yelpscrap=debug,info"),
            2 => EnvFilter::new("yelpscrap=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Yelpscrap Dry Run ===\n");

    println!("Search:");
    println!("  Base URL: {}", config.search.base_url);
    if config.search.city.is_empty() {
        println!("  City: (none)");
    } else {
        println!("  City: {}", config.search.city);
    }

    println!("\nDistricts ({}):", config.search.districts.len());
    for district in &config.search.districts {
        println!("  - {}", district);
    }

    println!("\nCategory filters ({}):", config.search.cflts.len());
    for cflt in &config.search.cflts {
        println!("  - {}", cflt);
    }

    println!("\nScraper:");
    println!("  Max sleep: {}ms", config.scraper.max_sleep_ms);
    println!("  Debug mode: {}", config.scraper.debug);
    if let Some(fixture) = &config.scraper.fixture_path {
        println!("  Fixture: {}", fixture);
    }

    println!("\nOutput:");
    match &config.output.workbook_path {
        Some(path) => println!("  Workbook: {}", path),
        None => println!("  Workbook: (timestamped default)"),
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Query summary: {}", query_summary(&config.search));
}

/// Handles the main scrape operation
///
/// The export runs even when the scrape fails partway: whatever was
/// accumulated is written out before the error is surfaced, since partial
/// success beats re-crawling everything.
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    let summary = query_summary(&config.search);
    let base_url = config.search.base_url.clone();
    let workbook_path = config
        .output
        .workbook_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(default_workbook_path);

    let mut scraper = Scraper::new(config)?;
    let scrape_result = scraper.run().await;

    if let Err(e) = &scrape_result {
        tracing::error!("Scrape failed: {}; exporting collected shops anyway", e);
    }

    let shops = scraper.into_shops();
    tracing::info!(
        "Start XLSX export, there are {} shops to write at {}",
        shops.len(),
        workbook_path.display()
    );
    if let Err(export_err) = export_workbook(&shops, &summary, &base_url, &workbook_path) {
        return Err(combine_failures(export_err, scrape_result));
    }
    tracing::info!("Finish XLSX export at {}", workbook_path.display());

    scrape_result?;
    Ok(())
}

/// Combines an export failure with an earlier scrape failure so neither is lost
fn combine_failures(
    export_err: yelpscrap::ScrapError,
    scrape_result: yelpscrap::Result<()>,
) -> anyhow::Error {
    match scrape_result {
        Err(scrape_err) => anyhow::Error::from(export_err).context(format!(
            "workbook export failed after the scrape had already failed: {}",
            scrape_err
        )),
        Ok(()) => export_err.into(),
    }
}
