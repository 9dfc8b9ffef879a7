//! Deduplicating shop collector
//!
//! The collector owns the accumulated record set for the whole run. A shop's
//! canonical relative URL is its only identity: the first shop offered for a
//! given URL wins and later candidates are rejected, regardless of how their
//! other fields compare.

use crate::shop::Shop;
use std::collections::HashSet;

/// Process-lifetime, order-preserving record set keyed by shop URL
#[derive(Debug, Default)]
pub struct Collector {
    seen: HashSet<String>,
    shops: Vec<Shop>,
}

impl Collector {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate shop to the collector
    ///
    /// Returns true iff no prior shop shares this URL; the shop is then
    /// appended and owned by the collector. Membership is an O(1) amortized
    /// hash lookup, independent of crawl size.
    pub fn offer(&mut self, shop: Shop) -> bool {
        if self.seen.contains(&shop.url) {
            tracing::debug!("Duplicate shop rejected: {}", shop.url);
            return false;
        }

        self.seen.insert(shop.url.clone());
        self.shops.push(shop);
        true
    }

    /// Accepted shops in first-seen order
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// Number of accepted shops
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Whether no shop has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    /// Consumes the collector, yielding the accepted shops in order
    pub fn into_shops(self) -> Vec<Shop> {
        self.shops
    }
}
