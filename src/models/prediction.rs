//! No-show prediction models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named condition that raises an employee's no-show probability.
///
/// # Example
///
/// ```
/// use absence_engine::models::ContributingFactor;
///
/// assert_eq!(ContributingFactor::WeekendExtension.label(), "Weekend extension pattern");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributingFactor {
    /// Repeated short-notice filings.
    ShortNoticeHistory,
    /// Repeated Monday or Friday starts.
    WeekendExtension,
    /// Many records in the observation window.
    HighFrequency,
    /// Several absences in the days before the reference date.
    RecentSpike,
}

impl ContributingFactor {
    /// Human-readable label shown to reviewers.
    pub fn label(self) -> &'static str {
        match self {
            ContributingFactor::ShortNoticeHistory => "Short-notice history",
            ContributingFactor::WeekendExtension => "Weekend extension pattern",
            ContributingFactor::HighFrequency => "High absence frequency",
            ContributingFactor::RecentSpike => "Recent absence spike",
        }
    }
}

impl std::fmt::Display for ContributingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A predicted future absence for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoShowPrediction {
    /// The employee the prediction is about.
    pub employee_id: String,
    /// Display name of the employee.
    pub employee_name: String,
    /// Department of the employee.
    pub department: String,
    /// Next likely absence date.
    pub predicted_date: NaiveDate,
    /// Probability of an unplanned absence, between the base and the ceiling.
    pub probability: Decimal,
    /// Factors that raised the probability, in evaluation order.
    pub contributing_factors: Vec<ContributingFactor>,
    /// Suggested follow-up for a manager.
    pub recommendation_text: String,
}
