//! Analysis report models.
//!
//! This module contains the [`AnalysisReport`] returned by an engine run and
//! the [`AnalysisSummary`] counts handed to the presentation layer.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LeaveRecord, NoShowPrediction, PatternFinding, RiskLevel, Severity, TrendAlert};

/// Headline counts for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Distinct employees present in the window.
    pub employees_analyzed: usize,
    /// Findings with a high risk level.
    pub high_risk_findings: usize,
    /// Findings with a medium risk level.
    pub medium_risk_findings: usize,
    /// Findings with a low risk level.
    pub low_risk_findings: usize,
    /// Emitted predictions.
    pub predictions: usize,
    /// Predictions above the proactive check-in threshold.
    pub check_ins_recommended: usize,
    /// Critical alerts.
    pub critical_alerts: usize,
    /// Warning alerts.
    pub warning_alerts: usize,
    /// Informational alerts.
    pub info_alerts: usize,
}

impl AnalysisSummary {
    /// Tallies the results of a run.
    ///
    /// # Example
    ///
    /// ```
    /// use absence_engine::models::AnalysisSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let summary = AnalysisSummary::summarize(&[], &[], &[], &[], Decimal::new(60, 2));
    /// assert_eq!(summary, AnalysisSummary::default());
    /// ```
    pub fn summarize(
        records: &[LeaveRecord],
        patterns: &[PatternFinding],
        predictions: &[NoShowPrediction],
        alerts: &[TrendAlert],
        check_in_threshold: Decimal,
    ) -> Self {
        let employees: HashSet<&str> = records.iter().map(|r| r.employee_id.as_str()).collect();
        let findings_at = |level: RiskLevel| patterns.iter().filter(|p| p.risk_level == level).count();
        let alerts_at = |severity: Severity| alerts.iter().filter(|a| a.severity == severity).count();

        Self {
            employees_analyzed: employees.len(),
            high_risk_findings: findings_at(RiskLevel::High),
            medium_risk_findings: findings_at(RiskLevel::Medium),
            low_risk_findings: findings_at(RiskLevel::Low),
            predictions: predictions.len(),
            check_ins_recommended: predictions
                .iter()
                .filter(|p| p.probability > check_in_threshold)
                .count(),
            critical_alerts: alerts_at(Severity::Critical),
            warning_alerts: alerts_at(Severity::Warning),
            info_alerts: alerts_at(Severity::Info),
        }
    }
}

/// The complete result of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Correlation id for the run.
    pub run_id: Uuid,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// The date the analysis was computed relative to.
    pub reference_date: NaiveDate,
    /// First day of the observation window.
    pub window_start: NaiveDate,
    /// Number of records the analyzers saw.
    pub records_analyzed: usize,
    /// True when the record source failed and an empty window was analyzed.
    pub source_degraded: bool,
    /// Ranked pattern findings.
    pub patterns: Vec<PatternFinding>,
    /// Ranked no-show predictions.
    pub predictions: Vec<NoShowPrediction>,
    /// Ranked trend alerts.
    pub alerts: Vec<TrendAlert>,
    /// Headline counts.
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    /// Returns true when nothing was found, predicted or alerted.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.predictions.is_empty() && self.alerts.is_empty()
    }
}
