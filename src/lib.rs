//! FLIPPER — Autonomous Resale Arbitrage Agent
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod evaluator;
pub mod memory;
pub mod metrics;
pub mod orchestrator;
pub mod price;
pub mod providers;
pub mod types;
