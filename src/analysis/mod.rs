//! Analysis logic for the Absence Analytics Engine.
//!
//! This module contains the three analyzers and the helpers they share:
//! pattern detection over per-employee record groups, no-show risk scoring,
//! month-over-month trend analysis, calendar helpers for weekday and month
//! window handling, and the stable result ranking applied to every output.
//!
//! Every analyzer is a pure function of the records (and, where relevant,
//! a reference date). Running one twice over the same input yields the
//! same output in the same order.

mod calendar;
mod grouping;
mod pattern_detector;
mod ranking;
mod risk_scorer;
mod trend_analyzer;

pub use calendar::{
    MonthWindow, MonthWindows, SHORT_NOTICE_MAX_DAYS, is_friday, is_monday, is_monday_or_friday,
    is_short_notice, is_within_trailing_days, next_monday_or_friday, observation_window_start,
};
pub use grouping::{EmployeeGroup, group_by_employee};
pub use pattern_detector::{detect_patterns, detect_patterns_with};
pub use ranking::{rank_alerts, rank_findings, rank_predictions, stable_rank};
pub use risk_scorer::{
    CHECK_IN_RECOMMENDATION, MONITOR_RECOMMENDATION, predict_no_shows, predict_no_shows_with,
};
pub use trend_analyzer::{DECLINING_TITLE, analyze_trends, analyze_trends_with};
