//! Shared types for the FLIPPER agent.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that provider, evaluator,
//! and orchestrator modules can depend on them without circular
//! references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A candidate item pulled from the retail account. Immutable once fetched.
///
/// `price` is the raw currency-formatted text as the storefront reports it
/// (e.g. `"€499.00"`); numeric conversion happens in the price parser so
/// that malformed provider data is handled at one seam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Purchase price as currency text, e.g. `"€25,00"`.
    pub price: String,
    pub source: ItemSource,
}

impl Item {
    pub fn new(name: impl Into<String>, price: impl Into<String>, source: ItemSource) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            source,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.source, self.name, self.price)
    }
}

/// Which retail collection an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    Order,
    Cart,
    Wishlist,
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSource::Order => write!(f, "order"),
            ItemSource::Cart => write!(f, "cart"),
            ItemSource::Wishlist => write!(f, "wishlist"),
        }
    }
}

impl std::str::FromStr for ItemSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order" | "orders" => Ok(ItemSource::Order),
            "cart" => Ok(ItemSource::Cart),
            "wishlist" => Ok(ItemSource::Wishlist),
            _ => Err(anyhow::anyhow!("Unknown item source: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Competitor quote
// ---------------------------------------------------------------------------

/// The lowest competitor price found for an item. One per item per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorQuote {
    pub vendor: String,
    /// Quoted price as currency text, e.g. `"€50.00"`.
    pub price: String,
}

impl fmt::Display for CompetitorQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.price, self.vendor)
    }
}

// ---------------------------------------------------------------------------
// Deal
// ---------------------------------------------------------------------------

/// A recorded profitable resale decision. Created only when the evaluator
/// approves a listing; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub item_name: String,
    pub purchase_price: String,
    pub competitor_price: String,
    pub resale_price: String,
    pub listing_id: Option<String>,
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: bought for {}, competitor price {}, listing at {} (ID {})",
            self.item_name,
            self.purchase_price,
            self.competitor_price,
            self.resale_price,
            self.listing_id.as_deref().unwrap_or("unlisted"),
        )
    }
}

// ---------------------------------------------------------------------------
// Listing receipt
// ---------------------------------------------------------------------------

/// What the marketplace returns after a listing is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingReceipt {
    pub listing_id: String,
    pub title: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
