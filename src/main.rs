//! FLIPPER — Autonomous Resale Arbitrage Agent
//!
//! Entry point. Loads configuration, initialises structured logging,
//! and dispatches the CLI commands: `run` executes one pipeline
//! iteration and records its metrics, `stats` prints aggregates over
//! past runs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use flipper::config::AppConfig;
use flipper::evaluator::{DealEvaluator, EvaluatorConfig};
use flipper::memory::MemoryStore;
use flipper::metrics::{MetricsLog, RunRecord};
use flipper::orchestrator::{Orchestrator, RunSettings};
use flipper::providers::marketplace::MockMarketplace;
use flipper::providers::notifier::ConsoleNotifier;
use flipper::providers::price_index::MockPriceIndex;
use flipper::providers::storefront::MockStorefront;

const BANNER: &str = r#"
 _____ _     ___ ____  ____  _____ ____
|  ___| |   |_ _|  _ \|  _ \| ____|  _ \
| |_  | |    | || |_) | |_) |  _| | |_) |
|  _| | |___ | ||  __/|  __/| |___|  _ <
|_|   |_____|___|_|   |_|   |_____|_| \_\

  Autonomous Resale Arbitrage Agent
  v0.1.0 — one iteration per invocation
"#;

#[derive(Parser)]
#[command(name = "flipper", about = "FLIPPER: Autonomous Resale Arbitrage Agent")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute one pipeline iteration, then log metrics.
    Run,
    /// Print aggregated metrics across recorded runs.
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // An unrecognised command prints usage without failing the process.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Ok(());
        }
    };

    let cfg = AppConfig::load(&cli.config)?;
    init_logging();

    match cli.command {
        Command::Run => run_once(&cfg).await,
        Command::Stats => print_stats(&cfg),
    }
}

/// Wire the mock providers into the orchestrator and execute one run.
async fn run_once(cfg: &AppConfig) -> Result<()> {
    println!("{BANNER}");
    info!(
        agent_name = %cfg.agent.name,
        profit_margin = cfg.agent.profit_margin,
        currency = %cfg.agent.currency_symbol,
        "FLIPPER starting up"
    );

    let memory = MemoryStore::load(cfg.storage.memory_path.as_str());

    let mut orchestrator = Orchestrator::new(
        Box::new(MockStorefront::new()),
        Box::new(MockPriceIndex::new()),
        Box::new(MockMarketplace::new()),
        Box::new(ConsoleNotifier::new()),
        DealEvaluator::new(EvaluatorConfig {
            margin: cfg.agent.profit_margin,
        }),
        memory,
        RunSettings {
            currency_symbol: cfg.agent.currency_symbol.clone(),
            recipients: cfg.notifications.recipients.clone(),
        },
    );

    let report = orchestrator.run().await?;

    let metrics = MetricsLog::new(cfg.storage.metrics_path.as_str());
    let record = RunRecord {
        timestamp: report.timestamp.clone(),
        offers_evaluated: report.offers_evaluated,
        listings_created: report.listings_created,
    };
    if let Err(e) = metrics.append(&record) {
        warn!(error = %e, "Failed to record run metrics");
    }

    info!(
        items = report.items_fetched,
        evaluated = report.offers_evaluated,
        listed = report.listings_created,
        deals = report.deals.len(),
        "FLIPPER run finished"
    );

    Ok(())
}

/// Print aggregated metrics, or a hint when nothing has been recorded.
fn print_stats(cfg: &AppConfig) -> Result<()> {
    let metrics = MetricsLog::new(cfg.storage.metrics_path.as_str());

    match metrics.aggregate()? {
        Some(summary) => {
            println!("Run statistics:");
            println!("runs: {}", summary.runs);
            println!("avg_offers_evaluated: {:.2}", summary.avg_offers_evaluated);
            println!("avg_listings_created: {:.2}", summary.avg_listings_created);
        }
        None => println!("No metrics recorded yet."),
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flipper=info"));

    let json_logging = std::env::var("FLIPPER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
