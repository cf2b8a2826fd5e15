//! In-memory leave source.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DataSourceError;
use crate::models::LeaveRecord;

use super::{LeaveScope, LeaveSource, select_window};

/// A source backed by an already materialized collection.
///
/// Used for records handed over by a caller and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    records: Vec<LeaveRecord>,
}

impl InMemorySource {
    /// Creates a source over `records`.
    pub fn new(name: impl Into<String>, records: Vec<LeaveRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Number of records held, before any window filtering.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl LeaveSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_leave_window(
        &self,
        scope: &LeaveScope,
        since: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, DataSourceError> {
        Ok(select_window(
            self.records.iter().cloned(),
            scope,
            since,
            &self.name,
        ))
    }
}
