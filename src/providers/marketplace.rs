//! Mock resale marketplace.
//!
//! Stands in for a real listing API. Mints a listing identifier and
//! returns a receipt; no listing is actually created anywhere.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::Marketplace;
use crate::types::ListingReceipt;

/// Listing-creation stub that mints `LST-{uuid}` identifiers.
#[derive(Debug, Default)]
pub struct MockMarketplace;

impl MockMarketplace {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Marketplace for MockMarketplace {
    async fn create_listing(
        &self,
        item_name: &str,
        purchase_price: &str,
        resale_price: &str,
    ) -> Result<ListingReceipt> {
        let receipt = ListingReceipt {
            listing_id: format!("LST-{}", Uuid::new_v4()),
            title: format!("{item_name} - bargain price!"),
            status: "created".to_string(),
        };

        info!(
            item = item_name,
            listing_id = %receipt.listing_id,
            purchase = purchase_price,
            resale = resale_price,
            "Mock listing created"
        );

        Ok(receipt)
    }

    fn name(&self) -> &str {
        "mock-marketplace"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
