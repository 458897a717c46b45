//! Capability interfaces for external collaborators.
//!
//! Defines the four provider traits the orchestrator depends on and ships
//! mock implementations standing in for the future network integrations:
//! - `Storefront` — retail account (orders, cart, wishlist)
//! - `PriceIndex` — competitor price comparison
//! - `Marketplace` — resale listing creation
//! - `Notifier` — report delivery
//!
//! Implementations are injected into the orchestrator, so mocks can be
//! swapped for real clients without touching the pipeline.

pub mod marketplace;
pub mod notifier;
pub mod price_index;
pub mod storefront;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{CompetitorQuote, Item, ListingReceipt};

/// Source of candidate items from the retail account.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Recently purchased items.
    async fn recent_orders(&self) -> Result<Vec<Item>>;

    /// Items currently in the shopping cart.
    async fn cart_items(&self) -> Result<Vec<Item>>;

    /// Items on the wishlist.
    async fn wishlist_items(&self) -> Result<Vec<Item>>;

    /// Provider name for logging and error messages.
    fn name(&self) -> &str;
}

/// Competitor price lookup.
#[async_trait]
pub trait PriceIndex: Send + Sync {
    /// The lowest competitor price found for the named item.
    async fn lowest_price(&self, item_name: &str) -> Result<CompetitorQuote>;

    /// Provider name for logging and error messages.
    fn name(&self) -> &str;
}

/// Resale listing creation.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Create a listing at the given resale price. Price arguments are
    /// currency text, exactly as they will appear in the listing.
    async fn create_listing(
        &self,
        item_name: &str,
        purchase_price: &str,
        resale_price: &str,
    ) -> Result<ListingReceipt>;

    /// Provider name for logging and error messages.
    fn name(&self) -> &str;
}

/// Report delivery to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()>;

    /// Provider name for logging and error messages.
    fn name(&self) -> &str;
}
