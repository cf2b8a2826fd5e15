//! Core data models for the Absence Analytics Engine.
//!
//! This module contains the input record type and the value objects the
//! analyzers produce.

mod leave_record;
mod pattern_finding;
mod prediction;
mod report;
mod trend_alert;

pub use leave_record::{LeaveRecord, LeaveStatus, UNKNOWN};
pub use pattern_finding::{PatternFinding, PatternType, RiskLevel};
pub use prediction::{ContributingFactor, NoShowPrediction};
pub use report::{AnalysisReport, AnalysisSummary};
pub use trend_alert::{AlertType, Severity, TrendAlert, TrendDirection};
