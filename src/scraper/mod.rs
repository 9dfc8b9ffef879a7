//! Scraper module for page fetching and record extraction
//!
//! This module contains the core crawl-and-extract loop, including:
//! - Search URL construction per (page, category) pair
//! - HTTP fetching with a fixed browser-emulation header set
//! - Result-block extraction with tolerant failure handling
//! - URL-keyed deduplication
//! - Randomized politeness delays and overall coordination

mod collector;
mod coordinator;
mod delay;
mod extractor;
mod fetcher;
mod url_builder;

pub use collector::Collector;
pub use coordinator::{scrape, Scraper};
pub use delay::{DelayPolicy, MIN_SLEEP_MS};
pub use extractor::{extract_shops, extract_zipcode, ExtractError, PageExtraction};
pub use fetcher::{build_http_client, fetch_page, PageSource};
pub use url_builder::{build_search_url, page_to_offset, PAGE_SIZE};
