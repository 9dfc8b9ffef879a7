//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building an HTTP client with a fixed browser-emulation header set
//! - GET requests for search-result pages
//! - Retry logic for transient failures
//! - The debug-mode fixture substitution for offline runs

use crate::{Result, ScrapError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Maximum GET attempts for one URL (first try included)
const FETCH_ATTEMPTS: u32 = 3;

/// Pause between retry attempts
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// The fixed header set, chosen to resemble an ordinary Chrome request
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_5) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("fr,en-US;q=0.8,en;q=0.6"),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Builds the HTTP client used for all page fetches
///
/// Headers are static configuration, not per-request logic. Accept-Encoding
/// is negotiated by reqwest's gzip/brotli support; setting it manually would
/// disable automatic response decompression.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .default_headers(browser_headers())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a search-result page, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | HTTP 5xx | Retry up to 3 attempts, 500ms pause |
/// | Timeout / connection error | Retry up to 3 attempts, 500ms pause |
/// | Any other HTTP status | Immediate error |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The raw HTML body
/// * `Err(ScrapError)` - Transport failure or non-2xx status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_fetch(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if is_transient(&e) && attempt < FETCH_ATTEMPTS => {
                tracing::warn!(
                    "Fetch attempt {}/{} for {} failed: {}; retrying",
                    attempt,
                    FETCH_ATTEMPTS,
                    url,
                    e
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Performs a single GET request
async fn try_fetch(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ScrapError::Http {
        url: url.to_string(),
        source,
    })
}

/// Whether an error is worth retrying
fn is_transient(error: &ScrapError) -> bool {
    match error {
        ScrapError::Status { status, .. } => *status >= 500,
        ScrapError::Http { source, .. } => source.is_timeout() || source.is_connect(),
        _ => false,
    }
}

/// Where page documents come from
///
/// The debug mode substitutes a fixed local document for the network call,
/// without touching extractor logic.
#[derive(Debug)]
pub enum PageSource {
    /// Live HTTP fetches against the configured site
    Http(Client),

    /// A fixed local document served for every request
    Fixture(PathBuf),
}

impl PageSource {
    /// Fetches the document for the given URL
    pub async fn fetch(&self, url: &str) -> Result<String> {
        match self {
            PageSource::Http(client) => fetch_page(client, url).await,
            PageSource::Fixture(path) => {
                tracing::debug!("Debug mode: serving fixture {} for {}", path.display(), url);
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ScrapError::Fixture {
                        path: path.display().to_string(),
                        source,
                    })
            }
        }
    }
}
