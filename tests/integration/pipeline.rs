//! End-to-end pipeline tests over scripted providers.

use std::path::Path;
use tempfile::tempdir;

use flipper::evaluator::{DealEvaluator, EvaluatorConfig};
use flipper::memory::MemoryStore;
use flipper::metrics::{MetricsLog, RunRecord};
use flipper::orchestrator::{Orchestrator, RunSettings, SUBJECT_DEALS, SUBJECT_NO_DEALS};
use flipper::types::{Item, ItemSource};

use crate::mock_providers::{
    FixedPriceIndex, RecordingMarketplace, RecordingNotifier, ScriptedStorefront,
};

fn item(name: &str, price: &str, source: ItemSource) -> Item {
    Item::new(name, price, source)
}

fn orchestrator_with(
    storefront: ScriptedStorefront,
    index: FixedPriceIndex,
    marketplace: RecordingMarketplace,
    notifier: RecordingNotifier,
    memory_path: &Path,
) -> Orchestrator {
    Orchestrator::new(
        Box::new(storefront),
        Box::new(index),
        Box::new(marketplace),
        Box::new(notifier),
        DealEvaluator::new(EvaluatorConfig { margin: 0.15 }),
        MemoryStore::load(memory_path),
        RunSettings {
            currency_symbol: "€".to_string(),
            recipients: vec!["user@example.com".to_string()],
        },
    )
}

#[tokio::test]
async fn test_zero_items_sends_no_deals_report() {
    let dir = tempdir().unwrap();
    let notifier = RecordingNotifier::new();
    let marketplace = RecordingMarketplace::new();
    let mut orch = orchestrator_with(
        ScriptedStorefront::empty(),
        FixedPriceIndex::new("€50.00"),
        marketplace.clone(),
        notifier.clone(),
        &dir.path().join("memory.json"),
    );

    let report = orch.run().await.unwrap();

    assert_eq!(report.items_fetched, 0);
    assert_eq!(report.offers_evaluated, 0);
    assert_eq!(report.listings_created, 0);
    assert!(report.deals.is_empty());
    assert!(marketplace.created().is_empty());

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, SUBJECT_NO_DEALS);
    assert!(sent[0].body.contains("No profitable resale opportunities"));
    assert_eq!(sent[0].recipients, vec!["user@example.com".to_string()]);
}

#[tokio::test]
async fn test_profitable_items_listed_and_counted() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("Bargain Gadget", "€20.00", ItemSource::Order)],
        vec![item("Pricey Gadget", "€100.00", ItemSource::Cart)],
        Vec::new(),
    );
    let notifier = RecordingNotifier::new();
    let marketplace = RecordingMarketplace::new();
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        marketplace.clone(),
        notifier.clone(),
        &dir.path().join("memory.json"),
    );

    let report = orch.run().await.unwrap();

    // 50 * 1.15 = 57.50: profitable against 20, not against 100.
    assert_eq!(report.offers_evaluated, 2);
    assert_eq!(report.listings_created, 1);
    assert_eq!(report.parse_skips, 0);
    assert_eq!(report.deals.len(), 1);

    let deal = &report.deals[0];
    assert_eq!(deal.item_name, "Bargain Gadget");
    assert_eq!(deal.purchase_price, "€20.00");
    assert_eq!(deal.competitor_price, "€50.00");
    assert_eq!(deal.resale_price, "€57.50");
    assert_eq!(deal.listing_id.as_deref(), Some("LST-1"));

    let created = marketplace.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0], (
        "Bargain Gadget".to_string(),
        "€20.00".to_string(),
        "€57.50".to_string(),
    ));

    let sent = notifier.sent();
    assert_eq!(sent[0].subject, SUBJECT_DEALS);
    let deal_lines: Vec<&str> = sent[0].body.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(deal_lines.len(), 1);
    assert!(deal_lines[0].contains("Bargain Gadget"));
    assert!(deal_lines[0].contains("LST-1"));
}

#[tokio::test]
async fn test_acquisition_order_orders_cart_wishlist() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("From Orders", "€10.00", ItemSource::Order)],
        vec![item("From Cart", "€10.00", ItemSource::Cart)],
        vec![item("From Wishlist", "€10.00", ItemSource::Wishlist)],
    );
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &dir.path().join("memory.json"),
    );

    let report = orch.run().await.unwrap();

    // All profitable, so deal order mirrors acquisition order.
    let names: Vec<&str> = report.deals.iter().map(|d| d.item_name.as_str()).collect();
    assert_eq!(names, vec!["From Orders", "From Cart", "From Wishlist"]);
}

#[tokio::test]
async fn test_parse_failure_still_counts_as_evaluated() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![
            item("Good Gadget", "€20.00", ItemSource::Order),
            item("Broken Gadget", "not-a-price", ItemSource::Order),
        ],
        Vec::new(),
        Vec::new(),
    );
    let notifier = RecordingNotifier::new();
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        notifier.clone(),
        &dir.path().join("memory.json"),
    );

    let report = orch.run().await.unwrap();

    assert_eq!(report.offers_evaluated, 2);
    assert_eq!(report.listings_created, 1);
    assert_eq!(report.parse_skips, 1);
    assert_eq!(report.deals.len(), 1);

    let episodes = orch.memory().episodes();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].notes.len(), 1);
    assert!(episodes[0].notes[0].contains("Broken Gadget"));
}

#[tokio::test]
async fn test_unparseable_quote_skips_item() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("Oddly Quoted", "€10.00", ItemSource::Order)],
        Vec::new(),
        Vec::new(),
    );
    let index = FixedPriceIndex::new("€50.00").with_quote("Oddly Quoted", "call us");
    let notifier = RecordingNotifier::new();
    let mut orch = orchestrator_with(
        storefront,
        index,
        RecordingMarketplace::new(),
        notifier.clone(),
        &dir.path().join("memory.json"),
    );

    let report = orch.run().await.unwrap();

    assert_eq!(report.offers_evaluated, 1);
    assert_eq!(report.listings_created, 0);
    assert_eq!(report.parse_skips, 1);
    assert_eq!(notifier.sent()[0].subject, SUBJECT_NO_DEALS);
}

#[tokio::test]
async fn test_storefront_failure_aborts_run() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::empty();
    storefront.set_error("account session expired");
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &dir.path().join("memory.json"),
    );

    let err = orch.run().await.unwrap_err();
    assert!(err.to_string().contains("storefront"));
}

#[tokio::test]
async fn test_price_index_failure_names_item() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("Some Gadget", "€20.00", ItemSource::Order)],
        Vec::new(),
        Vec::new(),
    );
    let index = FixedPriceIndex::new("€50.00");
    index.set_error("comparison service down");
    let mut orch = orchestrator_with(
        storefront,
        index,
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &dir.path().join("memory.json"),
    );

    let err = orch.run().await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("price index"));
    assert!(msg.contains("Some Gadget"));
}

#[tokio::test]
async fn test_marketplace_failure_aborts_run() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("Bargain Gadget", "€20.00", ItemSource::Order)],
        Vec::new(),
        Vec::new(),
    );
    let marketplace = RecordingMarketplace::new();
    marketplace.set_error("listing quota exceeded");
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        marketplace,
        RecordingNotifier::new(),
        &dir.path().join("memory.json"),
    );

    let err = orch.run().await.unwrap_err();
    assert!(err.to_string().contains("marketplace"));
}

#[tokio::test]
async fn test_notifier_failure_aborts_run() {
    let dir = tempdir().unwrap();
    let notifier = RecordingNotifier::new();
    notifier.set_error("smtp unreachable");
    let mut orch = orchestrator_with(
        ScriptedStorefront::empty(),
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        notifier,
        &dir.path().join("memory.json"),
    );

    let err = orch.run().await.unwrap_err();
    assert!(err.to_string().contains("notifier"));
}

#[tokio::test]
async fn test_episode_persisted_and_reloaded() {
    let dir = tempdir().unwrap();
    let memory_path = dir.path().join("memory.json");
    let storefront = ScriptedStorefront::new(
        vec![
            item("Bargain Gadget", "€20.00", ItemSource::Order),
            item("Pricey Gadget", "€100.00", ItemSource::Order),
        ],
        Vec::new(),
        Vec::new(),
    );
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &memory_path,
    );

    let report = orch.run().await.unwrap();

    let reloaded = MemoryStore::load(&memory_path);
    assert_eq!(reloaded.episodes().len(), 1);
    let ep = &reloaded.episodes()[0];
    assert_eq!(ep.timestamp, report.timestamp);
    assert_eq!(ep.offers_evaluated, report.offers_evaluated);
    assert_eq!(ep.listings_created, report.listings_created);
}

#[tokio::test]
async fn test_corrupt_memory_recovers_and_appends() {
    let dir = tempdir().unwrap();
    let memory_path = dir.path().join("memory.json");
    std::fs::write(&memory_path, "garbage {{{").unwrap();

    let mut orch = orchestrator_with(
        ScriptedStorefront::empty(),
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &memory_path,
    );

    orch.run().await.unwrap();

    let reloaded = MemoryStore::load(&memory_path);
    assert_eq!(reloaded.episodes().len(), 1);
}

#[tokio::test]
async fn test_working_memory_records_item_count() {
    let dir = tempdir().unwrap();
    let storefront = ScriptedStorefront::new(
        vec![item("Bargain Gadget", "€20.00", ItemSource::Order)],
        vec![item("Pricey Gadget", "€100.00", ItemSource::Cart)],
        Vec::new(),
    );
    let mut orch = orchestrator_with(
        storefront,
        FixedPriceIndex::new("€50.00"),
        RecordingMarketplace::new(),
        RecordingNotifier::new(),
        &dir.path().join("memory.json"),
    );

    orch.run().await.unwrap();

    assert_eq!(
        orch.memory().recall("items_fetched"),
        Some(&serde_json::Value::from(2))
    );
}

#[tokio::test]
async fn test_metrics_across_runs() {
    let dir = tempdir().unwrap();
    let memory_path = dir.path().join("memory.json");
    let metrics = MetricsLog::new(dir.path().join("metrics.jsonl"));

    for catalogue in [
        vec![
            item("Bargain Gadget", "€20.00", ItemSource::Order),
            item("Pricey Gadget", "€100.00", ItemSource::Order),
        ],
        vec![item("Bargain Gadget", "€20.00", ItemSource::Order)],
    ] {
        let mut orch = orchestrator_with(
            ScriptedStorefront::new(catalogue, Vec::new(), Vec::new()),
            FixedPriceIndex::new("€50.00"),
            RecordingMarketplace::new(),
            RecordingNotifier::new(),
            &memory_path,
        );
        let report = orch.run().await.unwrap();
        metrics
            .append(&RunRecord {
                timestamp: report.timestamp.clone(),
                offers_evaluated: report.offers_evaluated,
                listings_created: report.listings_created,
            })
            .unwrap();
    }

    let summary = metrics.aggregate().unwrap().unwrap();
    assert_eq!(summary.runs, 2);
    assert!((summary.avg_offers_evaluated - 1.5).abs() < 1e-9);
    assert!((summary.avg_listings_created - 1.0).abs() < 1e-9);

    // The durable episode sequence grew monotonically across both runs.
    let reloaded = MemoryStore::load(&memory_path);
    assert_eq!(reloaded.episodes().len(), 2);
}
