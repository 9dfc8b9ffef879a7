//! Output module for the final dataset
//!
//! This module turns the accumulated shop list into an XLSX workbook with a
//! metadata header, and formats the query-summary line describing what was
//! scraped.

mod workbook;

pub use workbook::export_workbook;

use crate::config::SearchConfig;
use std::path::PathBuf;

/// Creates the one-line summary of the query for the workbook's first row
///
/// Parts are omitted when not configured, e.g.
/// `City: Paris - Districts: Sentier;Les_Halles - Cflts: burgers;bagels`.
pub fn query_summary(search: &SearchConfig) -> String {
    let mut res = String::new();

    if !search.city.is_empty() {
        res.push_str(&format!("City: {} - ", search.city));
    }

    if !search.districts.is_empty() {
        res.push_str(&format!("Districts: {} - ", search.districts.join(";")));
    }

    res.push_str(&format!("Cflts: {}", search.cflts.join(";")));

    res
}

/// Default workbook path: a timestamped filename in the working directory
pub fn default_workbook_path() -> PathBuf {
    let filename = chrono::Local::now()
        .format("yelpscrap-%Y-%m-%d_%H-%M-%S.xlsx")
        .to_string();
    PathBuf::from(filename)
}
