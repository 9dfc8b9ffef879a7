//! Shop record type
//!
//! A `Shop` is one accepted business listing. It is fully populated at
//! construction time and never mutated afterwards; candidates that cannot
//! fill every required field are discarded before a `Shop` exists.

/// A business listing extracted from one search-result block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    /// Display name of the shop
    pub name: String,

    /// Street address as shown on the page
    pub address: String,

    /// 5-digit zipcode derived from the address; empty when no match
    pub zip_code: String,

    /// Neighborhood label; empty when the page omits it
    pub district: String,

    /// Display phone number
    pub phone: String,

    /// Canonical relative URL; the sole deduplication key
    pub url: String,

    /// Textual categories as shown on the page (not the cflt taxonomy)
    pub categories: Vec<String>,
}

impl std::fmt::Display for Shop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)
    }
}
