//! Mock retail storefront.
//!
//! Returns a fixed catalogue of orders, cart items, and wishlist items.
//! Stands in for a real retail-account client.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::Storefront;
use crate::types::{Item, ItemSource};

/// Deterministic storefront stub with a fixed catalogue.
#[derive(Debug, Default)]
pub struct MockStorefront;

impl MockStorefront {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Storefront for MockStorefront {
    async fn recent_orders(&self) -> Result<Vec<Item>> {
        let orders = vec![
            Item::new("PlayStation 5", "€499.00", ItemSource::Order),
            Item::new("Coffee Grinder", "€89.00", ItemSource::Order),
            Item::new("Kettlebell Set", "€120.00", ItemSource::Order),
        ];
        debug!(count = orders.len(), "Fetched recent orders");
        Ok(orders)
    }

    async fn cart_items(&self) -> Result<Vec<Item>> {
        let cart = vec![
            Item::new("Wireless Mouse", "€25.00", ItemSource::Cart),
            Item::new("USB-C Cable", "€8.00", ItemSource::Cart),
        ];
        debug!(count = cart.len(), "Fetched cart items");
        Ok(cart)
    }

    async fn wishlist_items(&self) -> Result<Vec<Item>> {
        let wishlist = vec![
            Item::new("Mechanical Keyboard", "€95.00", ItemSource::Wishlist),
            Item::new("Noise Cancelling Headphones", "€199.00", ItemSource::Wishlist),
            Item::new("Fitness Tracker", "€59.99", ItemSource::Wishlist),
        ];
        debug!(count = wishlist.len(), "Fetched wishlist items");
        Ok(wishlist)
    }

    fn name(&self) -> &str {
        "mock-storefront"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
