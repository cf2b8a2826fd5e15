//! Leave record model and related types.
//!
//! This module defines the [`LeaveRecord`] struct and [`LeaveStatus`] enum
//! for representing time-off entries supplied by the record store.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Bucket used when a record has no resolved department or employee name.
pub const UNKNOWN: &str = "Unknown";

/// The workflow status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Filed and awaiting a decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Declined by a manager.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// A single leave or time-off entry.
///
/// Records are immutable input to the analyzers. `department` and
/// `employee_name` come from a join in the record store and may be missing.
///
/// # Example
///
/// ```
/// use absence_engine::models::{LeaveRecord, LeaveStatus};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let record = LeaveRecord {
///     employee_id: "emp_001".to_string(),
///     employee_name: Some("Alex Chen".to_string()),
///     department: None,
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     duration: Decimal::ONE,
///     status: LeaveStatus::Approved,
///     submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap(),
/// };
/// assert_eq!(record.department_or_unknown(), "Unknown");
/// assert_eq!(record.notice_days(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Identifier of the employee taking leave.
    pub employee_id: String,
    /// Display name of the employee, if resolved.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Department of the employee, if resolved.
    #[serde(default)]
    pub department: Option<String>,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Length of the leave in days. Half days are allowed.
    pub duration: Decimal,
    /// Workflow status of the request.
    pub status: LeaveStatus,
    /// When the request was filed.
    pub submitted_at: DateTime<Utc>,
}

impl LeaveRecord {
    /// Returns the department, or `"Unknown"` when it was not resolved.
    pub fn department_or_unknown(&self) -> &str {
        self.department.as_deref().unwrap_or(UNKNOWN)
    }

    /// Whole calendar days between filing and the first day of leave.
    ///
    /// Negative for entries filed after the leave started.
    pub fn notice_days(&self) -> i64 {
        (self.start_date - self.submitted_at.date_naive()).num_days()
    }

    /// Checks the record invariants.
    ///
    /// # Returns
    ///
    /// `InvalidRecord` if the employee id is blank, the end date precedes the
    /// start date, or the duration is not positive.
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |message: &str| {
            Err(EngineError::InvalidRecord {
                employee_id: self.employee_id.clone(),
                message: message.to_string(),
            })
        };

        if self.employee_id.trim().is_empty() {
            return fail("employee id is empty");
        }
        if self.end_date < self.start_date {
            return fail("end date before start date");
        }
        if self.duration <= Decimal::ZERO {
            return fail("duration must be positive");
        }
        Ok(())
    }
}
