//! Record window loading for the Absence Analytics Engine.
//!
//! The analyzers never talk to a store directly. A [`LeaveSource`] supplies
//! the records of an observation window, [`FallbackSource`] chains a primary
//! and a narrower fallback query, and [`load_or_empty`] turns a failed fetch
//! into an empty window so analysis can still run.

mod fallback;
mod json_file;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DataSourceError;
use crate::models::LeaveRecord;

pub use fallback::FallbackSource;
pub use json_file::JsonFileSource;
pub use memory::InMemorySource;

/// The organizational scope of a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum LeaveScope {
    /// Every record in the organization.
    Organization,
    /// Records of a single department. Records without a department match `"Unknown"`.
    Department(String),
}

impl LeaveScope {
    /// Returns true if `record` belongs to this scope.
    ///
    /// # Example
    ///
    /// ```
    /// use absence_engine::loader::LeaveScope;
    /// use absence_engine::models::{LeaveRecord, LeaveStatus};
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let mut record = LeaveRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     employee_name: None,
    ///     department: Some("Nursing".to_string()),
    ///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     duration: Decimal::ONE,
    ///     status: LeaveStatus::Approved,
    ///     submitted_at: Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap(),
    /// };
    ///
    /// assert!(LeaveScope::Organization.includes(&record));
    /// assert!(LeaveScope::Department("Nursing".to_string()).includes(&record));
    /// assert!(!LeaveScope::Department("Kitchen".to_string()).includes(&record));
    ///
    /// record.department = None;
    /// assert!(LeaveScope::Department("Unknown".to_string()).includes(&record));
    /// ```
    pub fn includes(&self, record: &LeaveRecord) -> bool {
        match self {
            LeaveScope::Organization => true,
            LeaveScope::Department(name) => record.department_or_unknown() == name.as_str(),
        }
    }
}

/// A store that can supply leave records for an observation window.
#[async_trait]
pub trait LeaveSource: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetches records in `scope` starting on or after `since`.
    async fn fetch_leave_window(
        &self,
        scope: &LeaveScope,
        since: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, DataSourceError>;
}

/// The outcome of [`load_or_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedWindow {
    /// The fetched records; empty when the source failed.
    pub records: Vec<LeaveRecord>,
    /// True when the source failed and the empty window was substituted.
    pub degraded: bool,
}

/// Fetches a window, substituting an empty one when the source fails.
pub async fn load_or_empty<S>(source: &S, scope: &LeaveScope, since: NaiveDate) -> LoadedWindow
where
    S: LeaveSource + ?Sized,
{
    match source.fetch_leave_window(scope, since).await {
        Ok(records) => LoadedWindow {
            records,
            degraded: false,
        },
        Err(err) => {
            warn!(
                source = source.name(),
                error = %err,
                "Leave records unavailable; analyzing an empty window"
            );
            LoadedWindow {
                records: Vec::new(),
                degraded: true,
            }
        }
    }
}

/// Keeps records that are valid, in `scope`, and start on or after `since`.
///
/// Invalid records are dropped with a warning.
pub(crate) fn select_window(
    records: impl IntoIterator<Item = LeaveRecord>,
    scope: &LeaveScope,
    since: NaiveDate,
    source_name: &str,
) -> Vec<LeaveRecord> {
    records
        .into_iter()
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(source = source_name, error = %err, "Dropping invalid leave record");
                false
            }
        })
        .filter(|record| record.start_date >= since && scope.includes(record))
        .collect()
}
