//! Episodic and working memory.
//!
//! Maintains the durable, append-only sequence of past episodes (persisted
//! as a JSON file across process restarts) and a transient working-memory
//! map scoped to the current run. Working memory is never persisted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Episode
// ---------------------------------------------------------------------------

/// One run of the pipeline, with aggregate counters.
///
/// Counters are mutated in place during the run and frozen when the
/// episode is finalized and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Creation time, RFC 3339. Unique per run.
    pub timestamp: String,
    pub offers_evaluated: u64,
    pub listings_created: u64,
    /// Per-item anomalies observed during the run (e.g. parse skips).
    pub notes: Vec<String>,
}

impl Episode {
    fn new(timestamp: String) -> Self {
        Self {
            timestamp,
            offers_evaluated: 0,
            listings_created: 0,
            notes: Vec::new(),
        }
    }
}

/// Handle to an episode in the durable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeId(usize);

/// On-disk representation of the episode sequence.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedMemory {
    episodes: Vec<Episode>,
}

// ---------------------------------------------------------------------------
// Memory store
// ---------------------------------------------------------------------------

/// Episodic memory backed by a JSON file, plus transient working memory.
///
/// The episode sequence is append-only: insertion order is chronological
/// and survives process restarts. An unreadable or corrupt backing file
/// is non-fatal — the store starts empty and the loss is logged.
pub struct MemoryStore {
    episodes: Vec<Episode>,
    working: HashMap<String, Value>,
    path: PathBuf,
}

impl MemoryStore {
    /// Load persisted episodes from `path`, or start fresh if the file is
    /// missing, unreadable, or corrupt.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "No episode file found, starting fresh");
            return Self::empty(path);
        }

        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Episode file unreadable — starting with empty history"
                );
                return Self::empty(path);
            }
        };

        match serde_json::from_str::<PersistedMemory>(&json) {
            Ok(persisted) => {
                info!(
                    path = %path.display(),
                    count = persisted.episodes.len(),
                    "Episodes loaded from disk"
                );
                Self {
                    episodes: persisted.episodes,
                    working: HashMap::new(),
                    path,
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Episode file corrupt — starting with empty history"
                );
                Self::empty(path)
            }
        }
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            episodes: Vec::new(),
            working: HashMap::new(),
            path,
        }
    }

    /// Begin a new episode with zeroed counters, appending it to the
    /// durable sequence immediately.
    pub fn start_episode(&mut self, timestamp: impl Into<String>) -> EpisodeId {
        let episode = Episode::new(timestamp.into());
        debug!(timestamp = %episode.timestamp, "Episode started");
        self.episodes.push(episode);
        EpisodeId(self.episodes.len() - 1)
    }

    pub fn episode(&self, id: EpisodeId) -> &Episode {
        &self.episodes[id.0]
    }

    /// In-place mutation handle for the current run's counters and notes.
    pub fn episode_mut(&mut self, id: EpisodeId) -> &mut Episode {
        &mut self.episodes[id.0]
    }

    /// Finalize an episode: persist the full episode sequence. Idempotent —
    /// calling it twice writes the same state twice. A write failure is
    /// logged and dropped; the run result is then not durably recorded.
    pub fn end_episode(&mut self, id: EpisodeId) {
        let episode = &self.episodes[id.0];
        info!(
            timestamp = %episode.timestamp,
            offers_evaluated = episode.offers_evaluated,
            listings_created = episode.listings_created,
            "Episode finalized"
        );

        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist episodes — run not durably recorded");
        }
    }

    /// Write the whole episode sequence to the backing file.
    pub fn save(&self) -> Result<()> {
        let persisted = PersistedMemory {
            episodes: self.episodes.clone(),
        };
        let json = serde_json::to_string_pretty(&persisted)
            .context("Failed to serialise episode history")?;

        std::fs::write(&self.path, &json)
            .with_context(|| format!("Failed to write episodes to {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = self.episodes.len(), "Episodes saved");
        Ok(())
    }

    /// All episodes, oldest first.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -- Working memory ---------------------------------------------------

    /// Store arbitrary data in working memory for the current run.
    pub fn remember(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.working.insert(key.into(), value.into());
    }

    /// Retrieve data from working memory.
    pub fn recall(&self, key: &str) -> Option<&Value> {
        self.working.get(key)
    }

    /// Clear working memory. Called once at the start of every run, before
    /// any provider calls.
    pub fn reset_working_memory(&mut self) {
        self.working.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
