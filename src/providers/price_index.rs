//! Mock competitor price index.
//!
//! Stands in for a price-comparison client. Quotes are derived
//! deterministically from the item name so that repeated runs and tests
//! see stable prices; a fixed-price constructor pins the quote exactly.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::PriceIndex;
use crate::price::format_price;
use crate::types::CompetitorQuote;

const MOCK_VENDOR: &str = "PriceWatch Vendor";

/// Deterministic price-comparison stub.
#[derive(Debug, Default)]
pub struct MockPriceIndex {
    fixed_price: Option<f64>,
}

impl MockPriceIndex {
    pub fn new() -> Self {
        Self { fixed_price: None }
    }

    /// Quote the same price for every item. Useful in tests.
    pub fn with_fixed_price(price: f64) -> Self {
        Self {
            fixed_price: Some(price),
        }
    }

    /// Stable pseudo-price in the 10.00–99.99 range derived from the
    /// item name.
    fn pseudo_price(item_name: &str) -> f64 {
        let hash = item_name
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
        10.0 + f64::from(hash % 9000) / 100.0
    }
}

#[async_trait]
impl PriceIndex for MockPriceIndex {
    async fn lowest_price(&self, item_name: &str) -> Result<CompetitorQuote> {
        let price = self
            .fixed_price
            .unwrap_or_else(|| Self::pseudo_price(item_name));

        let quote = CompetitorQuote {
            vendor: MOCK_VENDOR.to_string(),
            price: format_price("€", price),
        };
        debug!(item = item_name, quote = %quote, "Competitor quote");
        Ok(quote)
    }

    fn name(&self) -> &str {
        "mock-price-index"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
