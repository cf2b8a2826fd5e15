//! Error types for the Absence Analytics Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`DataSourceError`] covers the record loader boundary; [`EngineError`]
//! covers configuration, record validation and the analysis run itself.

use thiserror::Error;

/// Errors raised by a leave record source.
///
/// The engine never propagates these to its caller. A failed fetch is
/// logged and the analysis runs over an empty window instead.
///
/// # Example
///
/// ```
/// use absence_engine::error::DataSourceError;
///
/// let error = DataSourceError::Unauthorized {
///     source_name: "leave_store".to_string(),
/// };
/// assert_eq!(error.to_string(), "Data source 'leave_store' rejected the request as unauthorized");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSourceError {
    /// The source could not be reached or the query failed.
    #[error("Data source '{source_name}' is unavailable: {message}")]
    Unavailable {
        /// Name of the failing source.
        source_name: String,
        /// A description of the failure.
        message: String,
    },

    /// The source refused the query for the caller's credentials.
    #[error("Data source '{source_name}' rejected the request as unauthorized")]
    Unauthorized {
        /// Name of the refusing source.
        source_name: String,
    },

    /// The source answered with data that could not be decoded.
    #[error("Data source '{source_name}' returned malformed data: {message}")]
    Malformed {
        /// Name of the source.
        source_name: String,
        /// A description of the decoding problem.
        message: String,
    },
}

/// The main error type for the Absence Analytics Engine.
///
/// # Example
///
/// ```
/// use absence_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/analytics.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/analytics.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the analyzers cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A leave record broke one of its invariants.
    #[error("Invalid leave record for employee '{employee_id}': {message}")]
    InvalidRecord {
        /// The employee the record belongs to.
        employee_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// An analyzer worker task panicked or was cancelled.
    #[error("Analysis task '{task}' failed: {message}")]
    AnalysisTaskFailed {
        /// Which analyzer was running.
        task: String,
        /// The join error reported by the runtime.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
