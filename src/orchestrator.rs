//! Pipeline orchestrator.
//!
//! Sequences one full run: start an episode, acquire items from the
//! storefront, evaluate each item against its competitor quote, create
//! listings for profitable deals, notify the user, and finalize the
//! episode. Strictly sequential; each invocation is a fresh,
//! independent run with no retries or resumption.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::evaluator::DealEvaluator;
use crate::memory::MemoryStore;
use crate::price::{format_price, parse_price};
use crate::providers::{Marketplace, Notifier, PriceIndex, Storefront};
use crate::types::{Deal, Item};

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub timestamp: String,
    pub items_fetched: usize,
    pub offers_evaluated: u64,
    pub listings_created: u64,
    /// Items skipped because a price failed to parse. Skipped items still
    /// count toward `offers_evaluated`.
    pub parse_skips: u64,
    pub deals: Vec<Deal>,
}

/// Per-run settings passed in from configuration.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub currency_symbol: String,
    pub recipients: Vec<String>,
}

// ---------------------------------------------------------------------------
// Notification composition
// ---------------------------------------------------------------------------

pub const SUBJECT_NO_DEALS: &str = "Resale Agent Report: No deals found";
pub const SUBJECT_DEALS: &str = "Resale Agent Report: Deals Available";

/// Build the notification subject and body from the run's deals.
pub fn compose_report(deals: &[Deal]) -> (String, String) {
    if deals.is_empty() {
        return (
            SUBJECT_NO_DEALS.to_string(),
            "No profitable resale opportunities were detected during this run.".to_string(),
        );
    }

    let mut lines = vec![
        "The agent found the following items that can be resold for a profit:".to_string(),
        String::new(),
    ];
    for deal in deals {
        lines.push(format!("- {deal}"));
    }

    (SUBJECT_DEALS.to_string(), lines.join("\n"))
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Glues the providers, the evaluator, and the memory store together to
/// perform a single run of the workflow.
pub struct Orchestrator {
    storefront: Box<dyn Storefront>,
    price_index: Box<dyn PriceIndex>,
    marketplace: Box<dyn Marketplace>,
    notifier: Box<dyn Notifier>,
    evaluator: DealEvaluator,
    memory: MemoryStore,
    settings: RunSettings,
}

impl Orchestrator {
    pub fn new(
        storefront: Box<dyn Storefront>,
        price_index: Box<dyn PriceIndex>,
        marketplace: Box<dyn Marketplace>,
        notifier: Box<dyn Notifier>,
        evaluator: DealEvaluator,
        memory: MemoryStore,
        settings: RunSettings,
    ) -> Self {
        Self {
            storefront,
            price_index,
            marketplace,
            notifier,
            evaluator,
            memory,
            settings,
        }
    }

    /// Read access to the memory store (for the CLI and tests).
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Execute a single iteration of the agent workflow.
    ///
    /// Any provider failure aborts the run; the error context names the
    /// failing provider. A price-parse failure only skips that item.
    pub async fn run(&mut self) -> Result<RunReport> {
        let timestamp = Utc::now().to_rfc3339();
        self.memory.reset_working_memory();
        let episode = self.memory.start_episode(timestamp.clone());
        info!(timestamp = %timestamp, "Starting run");

        // -- Acquire ------------------------------------------------------

        let orders = self.storefront.recent_orders().await.with_context(|| {
            format!("storefront '{}': fetching recent orders failed", self.storefront.name())
        })?;
        let cart = self.storefront.cart_items().await.with_context(|| {
            format!("storefront '{}': fetching cart items failed", self.storefront.name())
        })?;
        let wishlist = self.storefront.wishlist_items().await.with_context(|| {
            format!("storefront '{}': fetching wishlist items failed", self.storefront.name())
        })?;

        // Acquisition order: orders, then cart, then wishlist.
        let items: Vec<Item> = orders
            .into_iter()
            .chain(cart)
            .chain(wishlist)
            .collect();
        self.memory.remember("items_fetched", items.len());
        info!(count = items.len(), "Items acquired");

        // -- Evaluate-loop ------------------------------------------------

        let mut deals: Vec<Deal> = Vec::new();
        let mut parse_skips: u64 = 0;

        for item in &items {
            let quote = self
                .price_index
                .lowest_price(&item.name)
                .await
                .with_context(|| {
                    format!(
                        "price index '{}': lookup failed for '{}'",
                        self.price_index.name(),
                        item.name
                    )
                })?;

            let parsed = parse_price(&item.price)
                .and_then(|purchase| parse_price(&quote.price).map(|comp| (purchase, comp)));

            let (purchase, competitor) = match parsed {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(item = %item.name, error = %e, "Unparseable price, skipping item");
                    let ep = self.memory.episode_mut(episode);
                    ep.notes.push(format!("skipped '{}': {e}", item.name));
                    // A skipped item still counts as an evaluated offer.
                    ep.offers_evaluated += 1;
                    parse_skips += 1;
                    continue;
                }
            };

            let evaluation = self.evaluator.evaluate(purchase, competitor);
            if evaluation.should_list {
                let resale_text =
                    format_price(&self.settings.currency_symbol, evaluation.resale_price);
                let receipt = self
                    .marketplace
                    .create_listing(&item.name, &item.price, &resale_text)
                    .await
                    .with_context(|| {
                        format!(
                            "marketplace '{}': listing creation failed for '{}'",
                            self.marketplace.name(),
                            item.name
                        )
                    })?;

                info!(
                    item = %item.name,
                    listing_id = %receipt.listing_id,
                    resale = %resale_text,
                    "Listing created"
                );
                deals.push(Deal {
                    item_name: item.name.clone(),
                    purchase_price: item.price.clone(),
                    competitor_price: quote.price.clone(),
                    resale_price: resale_text,
                    listing_id: Some(receipt.listing_id),
                });
                self.memory.episode_mut(episode).listings_created += 1;
            } else {
                debug!(item = %item.name, quote = %quote, "No profitable resale");
            }
            self.memory.episode_mut(episode).offers_evaluated += 1;
        }

        // -- Notify -------------------------------------------------------

        let (subject, body) = compose_report(&deals);
        self.notifier
            .send(&subject, &body, &self.settings.recipients)
            .await
            .with_context(|| format!("notifier '{}': delivery failed", self.notifier.name()))?;

        // -- Finalize -----------------------------------------------------

        self.memory.end_episode(episode);

        let ep = self.memory.episode(episode);
        let report = RunReport {
            timestamp,
            items_fetched: items.len(),
            offers_evaluated: ep.offers_evaluated,
            listings_created: ep.listings_created,
            parse_skips,
            deals,
        };

        info!(
            items = report.items_fetched,
            evaluated = report.offers_evaluated,
            listed = report.listings_created,
            skipped = report.parse_skips,
            "Run complete"
        );

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
