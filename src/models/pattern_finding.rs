//! Pattern finding models.
//!
//! A [`PatternFinding`] records one recurring absence behavior detected for
//! one employee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of recurring absence behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Leave repeatedly starting on a Monday.
    MondayAbsence,
    /// Leave repeatedly starting on a Friday.
    FridayAbsence,
    /// Leave repeatedly filed the day of, or the day before, it starts.
    ShortNotice,
    /// Many absences of a single day or less.
    FrequentSingleDay,
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternType::MondayAbsence => write!(f, "Monday absence"),
            PatternType::FridayAbsence => write!(f, "Friday absence"),
            PatternType::ShortNotice => write!(f, "Short notice"),
            PatternType::FrequentSingleDay => write!(f, "Frequent single-day absence"),
        }
    }
}

/// Ordinal risk classification of a finding.
///
/// # Example
///
/// ```
/// use absence_engine::models::RiskLevel;
///
/// assert!(RiskLevel::High.priority() < RiskLevel::Low.priority());
/// assert_eq!(RiskLevel::Medium.to_string(), "medium");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Threshold just reached.
    Low,
    /// One step above the threshold.
    Medium,
    /// Well above the threshold.
    High,
}

impl RiskLevel {
    /// Sort key for presentation; lower values rank first.
    pub fn priority(self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A recurring absence behavior detected for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFinding {
    /// The employee the finding is about.
    pub employee_id: String,
    /// Display name of the employee.
    pub employee_name: String,
    /// Department of the employee.
    pub department: String,
    /// Which behavior was detected.
    pub pattern_type: PatternType,
    /// Number of records matching the behavior.
    pub frequency: usize,
    /// Risk classification of the finding.
    pub risk_level: RiskLevel,
    /// Human-readable summary.
    pub detail_text: String,
    /// Start date of the first matching record in input order.
    pub last_occurrence_date: NaiveDate,
}
