//! Primary-then-fallback source composition.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::DataSourceError;
use crate::models::LeaveRecord;

use super::{LeaveScope, LeaveSource};

/// Tries a primary source and, if it fails, a narrower fallback.
///
/// When both fail the fallback's error is returned. No retries are made.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, F> {
    name: String,
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSource<P, F>
where
    P: LeaveSource,
    F: LeaveSource,
{
    /// Chains `primary` and `fallback`.
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{} (fallback: {})", primary.name(), fallback.name());
        Self {
            name,
            primary,
            fallback,
        }
    }
}

#[async_trait]
impl<P, F> LeaveSource for FallbackSource<P, F>
where
    P: LeaveSource,
    F: LeaveSource,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_leave_window(
        &self,
        scope: &LeaveScope,
        since: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, DataSourceError> {
        match self.primary.fetch_leave_window(scope, since).await {
            Ok(records) => Ok(records),
            Err(primary_err) => {
                warn!(
                    source = self.primary.name(),
                    error = %primary_err,
                    "Primary leave query failed; trying fallback"
                );
                let records = self.fallback.fetch_leave_window(scope, since).await?;
                info!(
                    source = self.fallback.name(),
                    records = records.len(),
                    "Fallback leave query succeeded"
                );
                Ok(records)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::loader::InMemorySource;
    use crate::models::LeaveStatus;

    #[derive(Default)]
    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeaveSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_leave_window(
            &self,
            _scope: &LeaveScope,
            _since: NaiveDate,
        ) -> Result<Vec<LeaveRecord>, DataSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DataSourceError::Unavailable {
                source_name: "failing".to_string(),
                message: "timeout".to_string(),
            })
        }
    }

    fn create_record() -> LeaveRecord {
        LeaveRecord {
            employee_id: "emp_001".to_string(),
            employee_name: None,
            department: None,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            duration: Decimal::ONE,
            status: LeaveStatus::Approved,
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    fn since() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let source = FallbackSource::new(
            InMemorySource::new("primary", vec![create_record()]),
            FailingSource::default(),
        );

        let records = source
            .fetch_leave_window(&LeaveScope::Organization, since())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(source.fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let source = FallbackSource::new(
            FailingSource::default(),
            InMemorySource::new("fallback", vec![create_record()]),
        );

        let records = source
            .fetch_leave_window(&LeaveScope::Organization, since())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(source.primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.name(), "failing (fallback: fallback)");
    }

    #[tokio::test]
    async fn test_both_failing_returns_error() {
        let source = FallbackSource::new(FailingSource::default(), FailingSource::default());

        let result = source
            .fetch_leave_window(&LeaveScope::Organization, since())
            .await;

        assert!(matches!(result, Err(DataSourceError::Unavailable { .. })));
        assert_eq!(source.primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.fallback.calls.load(Ordering::SeqCst), 1);
    }
}
