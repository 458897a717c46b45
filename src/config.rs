//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Storage paths are carried in the config and passed explicitly into
//! the memory store and metrics log — no implicit global paths.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub storage: StorageConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub name: String,
    /// Fractional markup applied to the competitor price, e.g. 0.15.
    pub profit_margin: f64,
    /// Symbol used when rendering resale prices, e.g. "€".
    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Episode history file (JSON).
    pub memory_path: String,
    /// Metrics log file (JSON lines).
    pub metrics_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationsConfig {
    pub recipients: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
