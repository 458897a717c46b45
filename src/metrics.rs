//! Run metrics sink.
//!
//! Appends one JSON record per run to a metrics file and computes simple
//! aggregates over the collected history. Append-only; records are never
//! rewritten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Per-run metrics, written after each episode ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    pub offers_evaluated: u64,
    pub listings_created: u64,
}

/// Aggregates over all recorded runs.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub runs: u64,
    pub avg_offers_evaluated: f64,
    pub avg_listings_created: f64,
}

// ---------------------------------------------------------------------------
// Metrics log
// ---------------------------------------------------------------------------

/// Append-only metrics log, one JSON line per run.
pub struct MetricsLog {
    path: PathBuf,
}

impl MetricsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a run record to the log file, creating it if absent.
    pub fn append(&self, record: &RunRecord) -> Result<()> {
        let line =
            serde_json::to_string(record).context("Failed to serialise metrics record")?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open metrics log {}", self.path.display()))?;

        writeln!(file, "{line}")
            .with_context(|| format!("Failed to append to metrics log {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Metrics recorded");
        Ok(())
    }

    /// Compute aggregates over all recorded runs. Returns `None` when no
    /// records exist. Malformed lines are skipped with a warning.
    pub fn aggregate(&self) -> Result<Option<MetricsSummary>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read metrics log {}", self.path.display()))?;

        let mut runs: u64 = 0;
        let mut total_offers: u64 = 0;
        let mut total_listings: u64 = 0;

        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RunRecord>(line) {
                Ok(record) => {
                    runs += 1;
                    total_offers += record.offers_evaluated;
                    total_listings += record.listings_created;
                }
                Err(e) => {
                    warn!(error = %e, "Skipping malformed metrics line");
                }
            }
        }

        if runs == 0 {
            return Ok(None);
        }

        Ok(Some(MetricsSummary {
            runs,
            avg_offers_evaluated: total_offers as f64 / runs as f64,
            avg_listings_created: total_listings as f64 / runs as f64,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
