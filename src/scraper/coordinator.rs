//! Scrape coordinator - main crawl orchestration logic
//!
//! This module drives the outer loop over category filters and the inner
//! loop over result pages, wiring URL builder, fetcher, extractor, and
//! collector together. Categories are processed sequentially in
//! configuration order; the only shared state across them is the single
//! collector and its accumulated record set.

use crate::config::Config;
use crate::scraper::collector::Collector;
use crate::scraper::delay::DelayPolicy;
use crate::scraper::extractor::extract_shops;
use crate::scraper::fetcher::{build_http_client, PageSource};
use crate::scraper::url_builder::build_search_url;
use crate::shop::Shop;
use crate::{ConfigError, Result, ScrapError};
use std::path::PathBuf;

/// Main scraper structure
pub struct Scraper {
    config: Config,
    source: PageSource,
    delay: DelayPolicy,
    collector: Collector,
}

impl Scraper {
    /// Creates a scraper from configuration
    ///
    /// In debug mode the configured fixture document replaces the network;
    /// otherwise a browser-emulating HTTP client is built.
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to run
    /// * `Err(ScrapError)` - Failed to build the HTTP client or bad debug config
    pub fn new(config: Config) -> Result<Self> {
        let source = if config.scraper.debug {
            let path = config.scraper.fixture_path.clone().ok_or_else(|| {
                ScrapError::Config(ConfigError::Validation(
                    "debug mode requires fixture_path".to_string(),
                ))
            })?;
            tracing::info!("Debug mode: pages come from fixture {}", path);
            PageSource::Fixture(PathBuf::from(path))
        } else {
            let client = build_http_client().map_err(|source| ScrapError::Http {
                url: config.search.base_url.clone(),
                source,
            })?;
            PageSource::Http(client)
        };

        let delay = DelayPolicy::Random {
            max_ms: config.scraper.max_sleep_ms,
        };

        Ok(Self::with_parts(config, source, delay))
    }

    /// Creates a scraper from explicit parts
    ///
    /// Lets tests substitute a fixture source or a zero-delay policy without
    /// altering orchestration logic.
    pub fn with_parts(config: Config, source: PageSource, delay: DelayPolicy) -> Self {
        Self {
            config,
            source,
            delay,
            collector: Collector::new(),
        }
    }

    /// Runs the full scrape: every configured category, in order
    ///
    /// A transport failure that survives the fetcher's retries aborts the
    /// run; shops accepted so far stay in the collector so the caller can
    /// still export them.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("Scrape has started");

        let cflts = self.config.search.cflts.clone();
        for cflt in &cflts {
            self.scrape_category(cflt).await?;
        }

        tracing::info!("Scrape finished: {} shops collected", self.collector.len());
        Ok(())
    }

    /// Scrapes one category's pagination until a page yields nothing new
    ///
    /// Pages are 1-based. A page whose accepted-record count is zero ends the
    /// category; an all-ad, all-malformed, or all-duplicate page terminates
    /// exactly like an empty one, and the raw block count is logged so the
    /// difference stays visible.
    async fn scrape_category(&mut self, cflt: &str) -> Result<()> {
        let mut page = 0u32;

        loop {
            page += 1;

            let url = build_search_url(page, cflt, &self.config.search)?;
            tracing::info!("Start scraping page {} at {}", page, url);

            let html = self.source.fetch(&url).await?;
            let extraction = extract_shops(&html);

            let mut accepted = 0;
            for shop in extraction.shops {
                let name = shop.name.clone();
                if self.collector.offer(shop) {
                    accepted += 1;
                    tracing::info!("New shop collected: {}", name);
                }
            }

            if accepted == 0 {
                if extraction.block_count > 0 {
                    tracing::debug!(
                        "Page {} had {} result blocks but no new shops",
                        page,
                        extraction.block_count
                    );
                }
                tracing::info!("No more shops for cflt '{}' after page {}", cflt, page);
                break;
            }

            tracing::info!(
                "Finish scraping page {} ({} shops accepted)",
                page,
                accepted
            );

            self.delay.wait().await;
        }

        Ok(())
    }

    /// Shops accepted so far, in first-seen order
    pub fn shops(&self) -> &[Shop] {
        self.collector.shops()
    }

    /// Consumes the scraper, yielding the accepted shops
    ///
    /// Valid after a failed run too: whatever was accumulated before the
    /// failure is returned for best-effort export.
    pub fn into_shops(self) -> Vec<Shop> {
        self.collector.into_shops()
    }
}

/// Runs a complete scrape and returns the accepted shops
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Example
///
/// ```no_run
/// use yelpscrap::config::load_config;
/// use yelpscrap::scraper::scrape;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let shops = scrape(config).await?;
/// println!("{} shops", shops.len());
/// # Ok(())
/// # }
/// ```
pub async fn scrape(config: Config) -> Result<Vec<Shop>> {
    let mut scraper = Scraper::new(config)?;
    scraper.run().await?;
    Ok(scraper.into_shops())
}
