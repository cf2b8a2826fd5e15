//! JSON file leave source.
//!
//! Reads a JSON array of leave records, as exported by the record store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::error::DataSourceError;
use crate::models::LeaveRecord;

use super::{LeaveScope, LeaveSource, select_window};

/// A source that reads an exported JSON array of records on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`. The source is named after the path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

#[async_trait]
impl LeaveSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_leave_window(
        &self,
        scope: &LeaveScope,
        since: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, DataSourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DataSourceError::Unavailable {
                source_name: self.name.clone(),
                message: e.to_string(),
            }
        })?;

        let records: Vec<LeaveRecord> =
            serde_json::from_str(&content).map_err(|e| DataSourceError::Malformed {
                source_name: self.name.clone(),
                message: e.to_string(),
            })?;

        let total = records.len();
        let selected = select_window(records, scope, since, &self.name);
        debug!(
            source = %self.name,
            total,
            selected = selected.len(),
            "Loaded leave records from file"
        );

        Ok(selected)
    }
}
