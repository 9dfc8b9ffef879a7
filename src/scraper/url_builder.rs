//! Search URL construction
//!
//! Builds the request URL for one (page, cflt) pair. The wire format keeps
//! the target site's literal query layout: parameters appear in a fixed
//! order (start offset, city scoping, category filter, district scoping) and
//! the district list is a bracketed, comma-joined literal with no extra
//! escaping.

use crate::config::SearchConfig;
use crate::{Result, ScrapError};

/// Number of results per page on the wire
pub const PAGE_SIZE: u32 = 10;

/// Transforms a 1-based page number into the wire's start offset
pub fn page_to_offset(page: u32) -> u32 {
    page.saturating_sub(1) * PAGE_SIZE
}

/// Builds the search URL for the given page and category filter
///
/// # Arguments
///
/// * `page` - 1-based page number
/// * `cflt` - Category filter code; must be non-empty
/// * `search` - Search scoping configuration
///
/// # Returns
///
/// * `Ok(String)` - The request URL
/// * `Err(ScrapError::EmptyCflt)` - The category filter was empty
pub fn build_search_url(page: u32, cflt: &str, search: &SearchConfig) -> Result<String> {
    if cflt.trim().is_empty() {
        return Err(ScrapError::EmptyCflt);
    }

    let mut url = format!(
        "{}/search?&start={}",
        search.base_url.trim_end_matches('/'),
        page_to_offset(page)
    );

    if !search.city.is_empty() {
        url.push_str(&format!("&find_loc={}", search.city));
    }

    url.push_str(&format!("&cflt={}", cflt));

    // District scoping overrides city scoping in effect; both stay on the wire
    if !search.districts.is_empty() {
        url.push_str(&format!(
            "&l=p:FR-75:{}::{}",
            search.city,
            bracket_list(&search.districts)
        ));
    }

    Ok(url)
}

/// Renders a list as the wire's bracketed, comma-joined literal
fn bracket_list(items: &[String]) -> String {
    format!("[{}]", items.join(","))
}
