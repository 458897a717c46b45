//! Resale opportunity detection.
//!
//! Compares the competitor price plus the configured margin against the
//! purchase price and decides whether a listing would be profitable.

use tracing::debug;

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Evaluator settings. The margin is a fractional markup applied uniformly
/// to every item in a run; it is not re-derived per item.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub margin: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { margin: 0.15 }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Outcome of evaluating a single item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub should_list: bool,
    pub resale_price: f64,
}

/// Decides list-or-skip for candidate items.
pub struct DealEvaluator {
    config: EvaluatorConfig,
}

impl DealEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Access the evaluator configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Target resale price is the competitor price marked up by the margin;
    /// listing is worthwhile only when that target exceeds what was paid.
    pub fn evaluate(&self, purchase_price: f64, competitor_price: f64) -> Evaluation {
        let resale_price = competitor_price * (1.0 + self.config.margin);
        let should_list = resale_price > purchase_price;

        debug!(
            purchase = format!("{purchase_price:.2}"),
            competitor = format!("{competitor_price:.2}"),
            resale = format!("{resale_price:.2}"),
            should_list,
            "Evaluated resale opportunity"
        );

        Evaluation {
            should_list,
            resale_price,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
