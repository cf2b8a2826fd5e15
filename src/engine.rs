//! Analysis runs for the Absence Analytics Engine.
//!
//! An [`AnalysisEngine`] fetches the observation window from its
//! [`LeaveSource`], runs the three analyzers side by side on blocking worker
//! tasks, and assembles an [`AnalysisReport`]. [`analyze_records`] does the
//! same work synchronously over records the caller already holds.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{
    analyze_trends_with, detect_patterns_with, observation_window_start, predict_no_shows_with,
};
use crate::config::AnalyticsConfig;
use crate::error::{EngineError, EngineResult};
use crate::loader::{LeaveScope, LeaveSource, load_or_empty};
use crate::models::{
    AnalysisReport, AnalysisSummary, LeaveRecord, NoShowPrediction, PatternFinding, TrendAlert,
};

/// Runs analyses over the records of a [`LeaveSource`].
///
/// # Example
///
/// ```
/// use absence_engine::engine::AnalysisEngine;
/// use absence_engine::loader::{InMemorySource, LeaveScope};
/// use chrono::NaiveDate;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let engine = AnalysisEngine::new(InMemorySource::new("memory", vec![]));
/// let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
///
/// let report = runtime
///     .block_on(engine.analyze(&LeaveScope::Organization, Some(today)))
///     .unwrap();
/// assert!(report.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisEngine<S> {
    source: S,
    config: Arc<AnalyticsConfig>,
}

impl<S: LeaveSource> AnalysisEngine<S> {
    /// Creates an engine with the default configuration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: Arc::new(AnalyticsConfig::default()),
        }
    }

    /// Creates an engine with a custom configuration.
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn with_config(source: S, config: AnalyticsConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Returns the record source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Analyzes the observation window ending at `reference_date` (today when `None`).
    ///
    /// A failing source does not fail the run: the report covers an empty
    /// window and has `source_degraded` set. An error is returned only if
    /// an analyzer task panics.
    pub async fn analyze(
        &self,
        scope: &LeaveScope,
        reference_date: Option<NaiveDate>,
    ) -> EngineResult<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let reference_date = reference_date.unwrap_or_else(|| Utc::now().date_naive());
        let window_start =
            observation_window_start(reference_date, self.config.observation_window_months);

        info!(
            run_id = %run_id,
            source = self.source.name(),
            scope = ?scope,
            reference_date = %reference_date,
            window_start = %window_start,
            "Starting absence analysis"
        );

        let loaded = load_or_empty(&self.source, scope, window_start).await;
        if loaded.degraded {
            warn!(run_id = %run_id, "Analysis running on an empty window");
        }
        let records: Arc<[LeaveRecord]> = loaded.records.into();

        let patterns = {
            let records = Arc::clone(&records);
            let config = Arc::clone(&self.config);
            tokio::task::spawn_blocking(move || detect_patterns_with(&records, &config.patterns))
        };
        let predictions = {
            let records = Arc::clone(&records);
            let config = Arc::clone(&self.config);
            tokio::task::spawn_blocking(move || {
                predict_no_shows_with(&records, reference_date, &config.risk)
            })
        };
        let alerts = {
            let records = Arc::clone(&records);
            let config = Arc::clone(&self.config);
            tokio::task::spawn_blocking(move || {
                analyze_trends_with(&records, reference_date, &config.trends)
            })
        };

        let (patterns, predictions, alerts) = tokio::try_join!(
            join_task("patterns", patterns),
            join_task("predictions", predictions),
            join_task("trends", alerts),
        )?;

        let report = build_report(
            run_id,
            &records,
            reference_date,
            window_start,
            loaded.degraded,
            AnalyzerOutput {
                patterns,
                predictions,
                alerts,
            },
            &self.config,
        );
        log_completion(&report, started);

        Ok(report)
    }
}

/// Analyzes `records` on the calling thread.
///
/// The records are taken as already windowed; `window_start` in the report
/// is informational.
///
/// # Example
///
/// ```
/// use absence_engine::config::AnalyticsConfig;
/// use absence_engine::engine::analyze_records;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// let report = analyze_records(&[], today, &AnalyticsConfig::default());
/// assert_eq!(report.records_analyzed, 0);
/// assert_eq!(report.window_start, NaiveDate::from_ymd_opt(2025, 9, 4).unwrap());
/// ```
pub fn analyze_records(
    records: &[LeaveRecord],
    reference_date: NaiveDate,
    config: &AnalyticsConfig,
) -> AnalysisReport {
    let run_id = Uuid::new_v4();
    let started = Instant::now();
    let window_start = observation_window_start(reference_date, config.observation_window_months);

    let output = AnalyzerOutput {
        patterns: detect_patterns_with(records, &config.patterns),
        predictions: predict_no_shows_with(records, reference_date, &config.risk),
        alerts: analyze_trends_with(records, reference_date, &config.trends),
    };

    let report = build_report(
        run_id,
        records,
        reference_date,
        window_start,
        false,
        output,
        config,
    );
    log_completion(&report, started);
    report
}

struct AnalyzerOutput {
    patterns: Vec<PatternFinding>,
    predictions: Vec<NoShowPrediction>,
    alerts: Vec<TrendAlert>,
}

async fn join_task<T>(task: &str, handle: JoinHandle<T>) -> EngineResult<T> {
    handle.await.map_err(|e| EngineError::AnalysisTaskFailed {
        task: task.to_string(),
        message: e.to_string(),
    })
}

fn build_report(
    run_id: Uuid,
    records: &[LeaveRecord],
    reference_date: NaiveDate,
    window_start: NaiveDate,
    source_degraded: bool,
    output: AnalyzerOutput,
    config: &AnalyticsConfig,
) -> AnalysisReport {
    let summary = AnalysisSummary::summarize(
        records,
        &output.patterns,
        &output.predictions,
        &output.alerts,
        config.risk.check_in_threshold,
    );

    AnalysisReport {
        run_id,
        generated_at: Utc::now(),
        reference_date,
        window_start,
        records_analyzed: records.len(),
        source_degraded,
        patterns: output.patterns,
        predictions: output.predictions,
        alerts: output.alerts,
        summary,
    }
}

fn log_completion(report: &AnalysisReport, started: Instant) {
    info!(
        run_id = %report.run_id,
        records = report.records_analyzed,
        patterns = report.patterns.len(),
        predictions = report.predictions.len(),
        alerts = report.alerts.len(),
        critical_alerts = report.summary.critical_alerts,
        duration_us = started.elapsed().as_micros() as u64,
        "Absence analysis completed"
    );
}
