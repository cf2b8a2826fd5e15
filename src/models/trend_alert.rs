//! Trend alert models.
//!
//! A [`TrendAlert`] is an organization or department scoped signal derived
//! from comparing absence volume across adjacent calendar months.

use serde::{Deserialize, Serialize};

/// The kind of trend signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Sharp month-over-month rise in overall absences.
    Spike,
    /// A structural pattern: department concentration, weekday clustering or decline.
    Pattern,
    /// A fixed threshold was crossed.
    Threshold,
    /// A rise during a known seasonal peak.
    Seasonal,
}

/// How urgently an alert needs attention.
///
/// # Example
///
/// ```
/// use absence_engine::models::Severity;
///
/// assert!(Severity::Critical.priority() < Severity::Info.priority());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// For awareness only.
    Info,
    /// Should be looked at.
    Warning,
    /// Needs action now.
    Critical,
}

impl Severity {
    /// Sort key for presentation; lower values rank first.
    pub fn priority(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Direction of the underlying trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Absences are rising.
    Up,
    /// Absences are falling.
    Down,
    /// No directional change implied.
    Stable,
}

/// An organization or department level trend signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAlert {
    /// The kind of signal.
    pub alert_type: AlertType,
    /// Short headline.
    pub title: String,
    /// Explanation with the counts involved.
    pub description: String,
    /// How urgent the alert is.
    pub severity: Severity,
    /// Number of records behind the alert.
    pub affected_count: usize,
    /// Department the alert is scoped to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Direction of the trend.
    pub trend_direction: TrendDirection,
    /// Whether someone needs to act.
    pub action_required: bool,
    /// What that action could be.
    pub suggested_action: String,
}
