//! Result extractor for search pages
//!
//! This module parses one HTML results page into candidate shop records.
//! Each listing lives in a `div.search-result` block; advertisement blocks
//! carry a `span.yloca-tip` marker and are filtered out. A block that fails
//! any required field extraction is discarded with a diagnostic and the rest
//! of the page continues processing.

use crate::shop::Shop;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

static SEARCH_RESULT: Lazy<Selector> = Lazy::new(|| selector("div.search-result"));
static AD_MARKER: Lazy<Selector> = Lazy::new(|| selector("span.yloca-tip"));
static BIZ_NAME: Lazy<Selector> = Lazy::new(|| selector("a.biz-name"));
static ADDRESS: Lazy<Selector> = Lazy::new(|| selector("address"));
static BIZ_PHONE: Lazy<Selector> = Lazy::new(|| selector("span.biz-phone"));
static DISTRICT: Lazy<Selector> = Lazy::new(|| selector("span.neighborhood-str-list"));
static CATEGORY_LINKS: Lazy<Selector> = Lazy::new(|| selector("span.category-str-list a"));

static ZIPCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{5}").expect("zipcode pattern is valid")
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector literal is valid")
}

/// Why one result block was discarded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("empty {0}")]
    EmptyField(&'static str),
}

/// Everything extracted from one results page
#[derive(Debug, Clone)]
pub struct PageExtraction {
    /// Valid, non-advertisement shop candidates in page order
    pub shops: Vec<Shop>,

    /// Raw number of result blocks seen, advertisements included
    ///
    /// Distinguishes an empty page (zero blocks) from a page that had only
    /// ads or malformed entries; callers wanting a stricter termination
    /// policy than "zero accepted records" read this.
    pub block_count: usize,
}

/// Parses a results page into candidate shops
///
/// Advertisement blocks count toward `block_count` but never produce a shop.
/// A block with a missing or empty required field is logged and skipped;
/// extraction never aborts the page.
pub fn extract_shops(html: &str) -> PageExtraction {
    let document = Html::parse_document(html);

    let mut shops = Vec::new();
    let mut block_count = 0;

    for block in document.select(&SEARCH_RESULT) {
        block_count += 1;

        if is_advertisement(&block) {
            tracing::debug!("Skipping advertisement block");
            continue;
        }

        match extract_shop(block) {
            Ok(shop) => shops.push(shop),
            Err(e) => tracing::warn!("A shop has been ignored because of a parsing error: {}", e),
        }
    }

    PageExtraction { shops, block_count }
}

/// Whether the result block is a paid placement
fn is_advertisement(block: &ElementRef<'_>) -> bool {
    block.select(&AD_MARKER).next().is_some()
}

/// Extracts one shop from a result block
///
/// Name, address, phone, and URL are required; district and categories may
/// be absent. The zipcode is derived from the address and is never fatal.
fn extract_shop(block: ElementRef<'_>) -> Result<Shop, ExtractError> {
    let name_link = block
        .select(&BIZ_NAME)
        .next()
        .ok_or(ExtractError::MissingField("name"))?;

    let name = text_of(name_link);
    if name.is_empty() {
        return Err(ExtractError::EmptyField("name"));
    }

    let url = name_link
        .value()
        .attr("href")
        .map(|href| href.trim().to_string())
        .ok_or(ExtractError::MissingField("url"))?;
    if url.is_empty() {
        return Err(ExtractError::EmptyField("url"));
    }

    let address = block
        .select(&ADDRESS)
        .next()
        .map(text_of)
        .ok_or(ExtractError::MissingField("address"))?;
    if address.is_empty() {
        return Err(ExtractError::EmptyField("address"));
    }

    let phone = block
        .select(&BIZ_PHONE)
        .next()
        .map(text_of)
        .ok_or(ExtractError::MissingField("phone"))?;
    if phone.is_empty() {
        return Err(ExtractError::EmptyField("phone"));
    }

    let district = block.select(&DISTRICT).next().map(text_of).unwrap_or_default();

    let categories: Vec<String> = block
        .select(&CATEGORY_LINKS)
        .map(text_of)
        .filter(|label| !label.is_empty())
        .collect();

    Ok(Shop {
        zip_code: extract_zipcode(&address),
        name,
        address,
        district,
        phone,
        url,
        categories,
    })
}

/// Gets a zipcode in the middle of an address
///
/// Takes the first run of 5 consecutive digits; returns an empty string when
/// there is none.
pub fn extract_zipcode(address: &str) -> String {
    ZIPCODE
        .find(address)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Collects and trims the text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
