//! Yelpscrap: a polite business-listing scraper
//!
//! This crate crawls paginated Yelp-style search results for a configured set
//! of category filters (`cflt` codes), extracts structured shop records,
//! deduplicates them by canonical URL, and exports the dataset to an XLSX
//! workbook.

pub mod config;
pub mod output;
pub mod scraper;
pub mod shop;

use thiserror::Error;

/// Main error type for yelpscrap operations
#[derive(Debug, Error)]
pub enum ScrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Category filter (cflt) must not be empty")]
    EmptyCflt,

    #[error("Failed to read fixture document {path}: {source}")]
    Fixture {
        path: String,
        source: std::io::Error,
    },

    #[error("Workbook export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

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

/// Result type alias for yelpscrap operations
pub type Result<T> = std::result::Result<T, ScrapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use scraper::{scrape, Collector, Scraper};
pub use shop::Shop;
