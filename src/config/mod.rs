//! Configuration loading and management for the Absence Analytics Engine.
//!
//! This module provides the thresholds, weights and ratios used by the
//! analyzers. Defaults match the standard rules; a YAML file may override
//! any subset of them.
//!
//! # Example
//!
//! ```no_run
//! use absence_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/analytics.yaml").unwrap();
//! println!("Spike ratio: {}", config.config().trends.spike_ratio);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AnalyticsConfig, PatternConfig, RiskConfig, TierThresholds, TrendConfig};
