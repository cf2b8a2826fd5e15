//! Absence Analytics Engine
//!
//! This crate analyzes employee leave records over a rolling observation
//! window. It detects recurring absence patterns per employee, scores the
//! risk of an unplanned absence on the next Monday or Friday, and raises
//! trend alerts on organization and department absence volumes.
//!
//! The three analyzers in [`analysis`] are pure functions over records.
//! [`engine::AnalysisEngine`] fetches the window from a [`loader::LeaveSource`]
//! and runs them together into a [`models::AnalysisReport`].

#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;

pub use engine::{AnalysisEngine, analyze_records};
pub use error::{DataSourceError, EngineError, EngineResult};
