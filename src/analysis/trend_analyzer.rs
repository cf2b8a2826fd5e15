//! Month-over-month trend analysis.
//!
//! This module compares absence counts across the current month, last month
//! and the month before, overall and per department, and emits
//! severity-tagged [`TrendAlert`]s.
//!
//! Ratio rules are evaluated as `current > previous × ratio` so no division
//! ever happens. When the previous month is empty the overall spike and
//! seasonal rules are skipped; the department rule treats an empty previous
//! month as new activity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TrendConfig;
use crate::models::{AlertType, LeaveRecord, Severity, TrendAlert, TrendDirection};

use super::calendar::{MonthWindow, MonthWindows, is_monday_or_friday};
use super::ranking::rank_alerts;

/// Title of the alert raised when absences fall sharply.
pub const DECLINING_TITLE: &str = "Absence Rate Declining";

/// Analyzes trends using the default ratios.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::analyze_trends;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// assert!(analyze_trends(&[], today).is_empty());
/// ```
pub fn analyze_trends(records: &[LeaveRecord], reference_date: NaiveDate) -> Vec<TrendAlert> {
    analyze_trends_with(records, reference_date, &TrendConfig::default())
}

/// Analyzes trends with custom ratios.
///
/// The result is ordered critical, warning, info; alerts of equal severity
/// keep rule order.
pub fn analyze_trends_with(
    records: &[LeaveRecord],
    reference_date: NaiveDate,
    config: &TrendConfig,
) -> Vec<TrendAlert> {
    let windows = MonthWindows::for_reference(reference_date);
    let counts = MonthCounts {
        current: windows.current.count(records),
        last: windows.last.count(records),
        two_months_ago: windows.two_months_ago.count(records),
    };

    debug!(
        current = counts.current,
        last = counts.last,
        two_months_ago = counts.two_months_ago,
        "Monthly absence counts"
    );

    let mut alerts = Vec::new();
    alerts.extend(overall_spike(&counts, config));
    alerts.extend(department_spikes(records, &windows, config));
    alerts.extend(weekday_concentration(records, &windows.last, config));
    alerts.extend(seasonal_adjustment(&counts, windows.current.month(), config));
    alerts.extend(improving_trend(&counts, config));

    rank_alerts(&mut alerts);
    alerts
}

#[derive(Debug, Clone, Copy)]
struct MonthCounts {
    current: usize,
    last: usize,
    two_months_ago: usize,
}

/// Returns true if `current > previous × ratio`.
fn exceeds(current: usize, previous: usize, ratio: Decimal) -> bool {
    Decimal::from(current) > Decimal::from(previous) * ratio
}

fn overall_spike(counts: &MonthCounts, config: &TrendConfig) -> Option<TrendAlert> {
    if counts.last == 0
        || counts.current < config.spike_min_count
        || !exceeds(counts.current, counts.last, config.spike_ratio)
    {
        return None;
    }

    let severity = if exceeds(counts.current, counts.last, config.spike_critical_ratio) {
        Severity::Critical
    } else {
        Severity::Warning
    };

    let continuation = if counts.last > counts.two_months_ago {
        format!(
            "This continues a rise from {} two months ago.",
            counts.two_months_ago
        )
    } else {
        "Last month did not rise, so this is a single-month jump.".to_string()
    };

    Some(TrendAlert {
        alert_type: AlertType::Spike,
        title: "Absence Spike Detected".to_string(),
        description: format!(
            "{} absences this month against {} last month. {}",
            counts.current, counts.last, continuation
        ),
        severity,
        affected_count: counts.current,
        department: None,
        trend_direction: TrendDirection::Up,
        action_required: true,
        suggested_action: "Review staffing cover and check for team-wide causes such as illness or workload."
            .to_string(),
    })
}

fn department_spikes(
    records: &[LeaveRecord],
    windows: &MonthWindows,
    config: &TrendConfig,
) -> Vec<TrendAlert> {
    let mut by_department: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let in_current = windows.current.contains(record.start_date);
        let in_last = windows.last.contains(record.start_date);
        if !in_current && !in_last {
            continue;
        }
        let entry = by_department
            .entry(record.department_or_unknown())
            .or_insert((0, 0));
        if in_current {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    by_department
        .into_iter()
        .filter(|(_, (current, last))| {
            *current >= config.department_min_count
                && (*last == 0 || exceeds(*current, *last, config.department_ratio))
        })
        .map(|(department, (current, last))| {
            let severity = if current >= config.department_critical_count {
                Severity::Critical
            } else {
                Severity::Warning
            };
            TrendAlert {
                alert_type: AlertType::Pattern,
                title: format!("Absence Increase in {}", department),
                description: format!(
                    "{} absences in {} this month against {} last month.",
                    current, department, last
                ),
                severity,
                affected_count: current,
                department: Some(department.to_string()),
                trend_direction: TrendDirection::Up,
                action_required: true,
                suggested_action: format!(
                    "Check in with the {} manager about cover and team wellbeing.",
                    department
                ),
            }
        })
        .collect()
}

fn weekday_concentration(
    records: &[LeaveRecord],
    last_month: &MonthWindow,
    config: &TrendConfig,
) -> Option<TrendAlert> {
    let (monday_friday, other) = records
        .iter()
        .filter(|r| last_month.contains(r.start_date))
        .fold((0usize, 0usize), |(mf, other), r| {
            if is_monday_or_friday(r.start_date) {
                (mf + 1, other)
            } else {
                (mf, other + 1)
            }
        });

    if monday_friday < config.concentration_min_count
        || !exceeds(monday_friday, other, config.concentration_ratio)
    {
        return None;
    }

    Some(TrendAlert {
        alert_type: AlertType::Pattern,
        title: "Monday/Friday Absence Concentration".to_string(),
        description: format!(
            "{} of last month's absences started on a Monday or Friday, against {} on other days.",
            monday_friday, other
        ),
        severity: Severity::Warning,
        affected_count: monday_friday,
        department: None,
        trend_direction: TrendDirection::Stable,
        action_required: true,
        suggested_action: "Review long-weekend absences with the employees involved.".to_string(),
    })
}

fn seasonal_adjustment(
    counts: &MonthCounts,
    current_month: u32,
    config: &TrendConfig,
) -> Option<TrendAlert> {
    if !config.seasonal_months.contains(&current_month)
        || counts.last == 0
        || counts.current < config.seasonal_min_count
        || !exceeds(counts.current, counts.last, config.seasonal_ratio)
    {
        return None;
    }

    Some(TrendAlert {
        alert_type: AlertType::Seasonal,
        title: "Seasonal Absence Increase".to_string(),
        description: format!(
            "{} absences this month against {} last month, during a usual holiday peak.",
            counts.current, counts.last
        ),
        severity: Severity::Info,
        affected_count: counts.current,
        department: None,
        trend_direction: TrendDirection::Up,
        action_required: false,
        suggested_action: "Plan cover for the holiday period.".to_string(),
    })
}

fn improving_trend(counts: &MonthCounts, config: &TrendConfig) -> Option<TrendAlert> {
    if counts.last < config.improving_min_previous
        || Decimal::from(counts.current) >= Decimal::from(counts.last) * config.improving_ratio
    {
        return None;
    }

    Some(TrendAlert {
        alert_type: AlertType::Pattern,
        title: DECLINING_TITLE.to_string(),
        description: format!(
            "{} absences this month against {} last month.",
            counts.current, counts.last
        ),
        severity: Severity::Info,
        affected_count: counts.current,
        department: None,
        trend_direction: TrendDirection::Down,
        action_required: false,
        suggested_action: "No action needed; note what changed.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, TimeZone, Utc, Weekday};

    use crate::models::LeaveStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_record(employee_id: &str, department: Option<&str>, start: NaiveDate) -> LeaveRecord {
        LeaveRecord {
            employee_id: employee_id.to_string(),
            employee_name: None,
            department: department.map(str::to_string),
            start_date: start,
            end_date: start,
            duration: Decimal::ONE,
            status: LeaveStatus::Approved,
            submitted_at: Utc.from_utc_datetime(
                &(start - Duration::days(7)).and_hms_opt(9, 0, 0).unwrap(),
            ),
        }
    }

    /// `count` records spread over the Tuesdays to Thursdays of a month,
    /// so the weekday rule stays quiet.
    fn midweek(count: usize, year: i32, month: u32, department: Option<&str>) -> Vec<LeaveRecord> {
        let days: Vec<NaiveDate> = date(year, month, 1)
            .iter_days()
            .take_while(|d| d.month() == month)
            .filter(|d| matches!(d.weekday(), Weekday::Tue | Weekday::Wed | Weekday::Thu))
            .collect();
        days.iter()
            .cycle()
            .take(count)
            .enumerate()
            .map(|(i, d)| create_record(&format!("emp_{:03}", i), department, *d))
            .collect()
    }

    // April 2026: not a seasonal month
    fn april() -> NaiveDate {
        date(2026, 4, 15)
    }

    fn titles(alerts: &[TrendAlert]) -> Vec<&str> {
        alerts.iter().map(|a| a.title.as_str()).collect()
    }

    /// TA-001: 10 vs 5 is a critical spike
    #[test]
    fn test_spike_critical() {
        let mut records = midweek(10, 2026, 4, None);
        records.extend(midweek(5, 2026, 3, None));

        let alerts = analyze_trends(&records, april());
        let spike = alerts.iter().find(|a| a.alert_type == AlertType::Spike).unwrap();
        assert_eq!(spike.severity, Severity::Critical);
        assert_eq!(spike.affected_count, 10);
        assert_eq!(spike.trend_direction, TrendDirection::Up);
        assert!(spike.action_required);
    }

    #[test]
    fn test_spike_warning_between_ratios() {
        // 7 > 5 x 1.3 = 6.5 but not > 7.5
        let mut records = midweek(7, 2026, 4, None);
        records.extend(midweek(5, 2026, 3, None));

        let alerts = analyze_trends(&records, april());
        let spike = alerts.iter().find(|a| a.alert_type == AlertType::Spike).unwrap();
        assert_eq!(spike.severity, Severity::Warning);
    }

    #[test]
    fn test_spike_requires_minimum_count() {
        // 4 > 2 x 1.5 but fewer than 5 records
        let mut records = midweek(4, 2026, 4, None);
        records.extend(midweek(2, 2026, 3, None));

        let alerts = analyze_trends(&records, april());
        assert!(alerts.iter().all(|a| a.alert_type != AlertType::Spike));
    }

    /// TA-002: an empty previous month never yields a spike
    #[test]
    fn test_spike_skipped_when_last_month_empty() {
        let records = midweek(12, 2026, 4, None);
        let alerts = analyze_trends(&records, april());
        assert!(alerts.iter().all(|a| a.alert_type != AlertType::Spike));
    }

    #[test]
    fn test_spike_description_mentions_sustained_rise() {
        let mut records = midweek(10, 2026, 4, None);
        records.extend(midweek(5, 2026, 3, None));
        records.extend(midweek(2, 2026, 2, None));

        let alerts = analyze_trends(&records, april());
        let spike = alerts.iter().find(|a| a.alert_type == AlertType::Spike).unwrap();
        assert!(spike.description.contains("rise from 2 two months ago"));
    }

    /// TA-003: department with 4 vs 2 is a warning
    #[test]
    fn test_department_warning() {
        let mut records = midweek(4, 2026, 4, Some("Kitchen"));
        records.extend(midweek(2, 2026, 3, Some("Kitchen")));

        let alerts = analyze_trends(&records, april());
        let dept: Vec<&TrendAlert> = alerts.iter().filter(|a| a.department.is_some()).collect();
        assert_eq!(dept.len(), 1);
        assert_eq!(dept[0].severity, Severity::Warning);
        assert_eq!(dept[0].affected_count, 4);
        assert_eq!(dept[0].alert_type, AlertType::Pattern);
        assert_eq!(dept[0].department.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn test_department_new_activity_is_critical_at_five() {
        let records = midweek(5, 2026, 4, Some("Laundry"));
        let alerts = analyze_trends(&records, april());

        let dept = alerts.iter().find(|a| a.department.is_some()).unwrap();
        assert_eq!(dept.severity, Severity::Critical);
    }

    #[test]
    fn test_department_not_flagged_below_ratio() {
        // 4 is not > 3 x 1.5
        let mut records = midweek(4, 2026, 4, Some("Kitchen"));
        records.extend(midweek(3, 2026, 3, Some("Kitchen")));

        let alerts = analyze_trends(&records, april());
        assert!(alerts.iter().all(|a| a.department.is_none()));
    }

    #[test]
    fn test_missing_department_bucketed_as_unknown() {
        let records = midweek(3, 2026, 4, None);
        let alerts = analyze_trends(&records, april());

        let dept = alerts.iter().find(|a| a.department.is_some()).unwrap();
        assert_eq!(dept.department.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_weekday_concentration() {
        // March 2026 Mondays: 2, 9, 16; Fridays: 6, 13
        let mut records: Vec<LeaveRecord> = [2, 9, 16, 6, 13]
            .iter()
            .map(|d| create_record("emp_mf", None, date(2026, 3, *d)))
            .collect();
        records.extend(midweek(6, 2026, 3, None));

        let alerts = analyze_trends(&records, april());
        let concentration = alerts
            .iter()
            .find(|a| a.title.starts_with("Monday/Friday"))
            .unwrap();
        assert_eq!(concentration.severity, Severity::Warning);
        assert_eq!(concentration.trend_direction, TrendDirection::Stable);
        assert_eq!(concentration.affected_count, 5);
    }

    #[test]
    fn test_weekday_concentration_not_flagged_when_spread_out() {
        // 5 Monday/Friday against 7 others: 5 is not > 5.6
        let mut records: Vec<LeaveRecord> = [2, 9, 16, 6, 13]
            .iter()
            .map(|d| create_record("emp_mf", None, date(2026, 3, *d)))
            .collect();
        records.extend(midweek(7, 2026, 3, None));

        let alerts = analyze_trends(&records, april());
        assert!(alerts.iter().all(|a| !a.title.starts_with("Monday/Friday")));
    }

    #[test]
    fn test_seasonal_in_december() {
        let mut records = midweek(5, 2026, 12, Some("A"));
        records.extend(midweek(4, 2026, 11, Some("B")));
        let alerts = analyze_trends(&records, date(2026, 12, 10));

        let seasonal = alerts
            .iter()
            .find(|a| a.alert_type == AlertType::Seasonal)
            .unwrap();
        assert_eq!(seasonal.severity, Severity::Info);
        assert!(!seasonal.action_required);
        assert_eq!(seasonal.affected_count, 5);
    }

    #[test]
    fn test_no_seasonal_outside_peak_months() {
        let mut records = midweek(5, 2026, 4, Some("A"));
        records.extend(midweek(4, 2026, 3, Some("B")));
        let alerts = analyze_trends(&records, april());
        assert!(alerts.iter().all(|a| a.alert_type != AlertType::Seasonal));
    }

    #[test]
    fn test_improving_trend() {
        let mut records = midweek(3, 2026, 4, Some("A"));
        records.extend(midweek(6, 2026, 3, Some("B")));

        let alerts = analyze_trends(&records, april());
        let declining = alerts.iter().find(|a| a.title == DECLINING_TITLE).unwrap();
        assert_eq!(declining.severity, Severity::Info);
        assert_eq!(declining.trend_direction, TrendDirection::Down);
        assert!(!declining.action_required);
    }

    #[test]
    fn test_alerts_ordered_by_severity() {
        // Critical spike, critical department, seasonal info
        let mut records = midweek(10, 2027, 1, Some("Kitchen"));
        records.extend(midweek(5, 2026, 12, Some("Front Desk")));

        let alerts = analyze_trends(&records, date(2027, 1, 20));
        let severities: Vec<Severity> = alerts.iter().map(|a| a.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort_by_key(|s| s.priority());
        assert_eq!(severities, sorted);
        assert_eq!(
            titles(&alerts),
            vec![
                "Absence Spike Detected",
                "Absence Increase in Kitchen",
                "Seasonal Absence Increase"
            ]
        );
    }

    #[test]
    fn test_records_outside_windows_ignored() {
        let records = midweek(20, 2025, 6, Some("Kitchen"));
        assert!(analyze_trends(&records, april()).is_empty());
    }
}
