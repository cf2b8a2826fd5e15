//! Recurring absence pattern detection.
//!
//! This module groups leave records by employee and flags four behaviors:
//! Monday starts, Friday starts, short-notice filing and frequent single-day
//! absence. Each behavior is tiered into a [`RiskLevel`] by its match count.

use tracing::debug;

use crate::config::{PatternConfig, TierThresholds};
use crate::models::{LeaveRecord, PatternFinding, PatternType, RiskLevel};

use super::calendar::{is_friday, is_monday, is_short_notice};
use super::grouping::{EmployeeGroup, group_by_employee};
use super::ranking::rank_findings;

/// Detects absence patterns using the default thresholds.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::detect_patterns;
///
/// assert!(detect_patterns(&[]).is_empty());
/// ```
pub fn detect_patterns(records: &[LeaveRecord]) -> Vec<PatternFinding> {
    detect_patterns_with(records, &PatternConfig::default())
}

/// Detects absence patterns with custom thresholds.
///
/// Employees with fewer than `min_records_per_employee` records are skipped.
/// The result is ordered high, medium, low; findings of equal level keep
/// the order in which their employees first appear in `records`.
pub fn detect_patterns_with(records: &[LeaveRecord], config: &PatternConfig) -> Vec<PatternFinding> {
    let mut findings = Vec::new();

    for group in group_by_employee(records) {
        if group.len() < config.min_records_per_employee {
            continue;
        }

        let candidates = [
            evaluate_rule(&group, PatternType::MondayAbsence, &config.weekday, |r| {
                is_monday(r.start_date)
            }),
            evaluate_rule(&group, PatternType::FridayAbsence, &config.weekday, |r| {
                is_friday(r.start_date)
            }),
            evaluate_rule(
                &group,
                PatternType::ShortNotice,
                &config.short_notice,
                is_short_notice,
            ),
            evaluate_rule(&group, PatternType::FrequentSingleDay, &config.single_day, |r| {
                r.duration <= config.single_day_max_duration
            }),
        ];

        for finding in candidates.into_iter().flatten() {
            debug!(
                employee_id = %finding.employee_id,
                pattern = ?finding.pattern_type,
                frequency = finding.frequency,
                risk_level = %finding.risk_level,
                "Absence pattern detected"
            );
            findings.push(finding);
        }
    }

    rank_findings(&mut findings);
    findings
}

/// Applies one rule to one employee's records.
///
/// The reported occurrence date is the start date of the first matching
/// record in input order.
fn evaluate_rule<P>(
    group: &EmployeeGroup<'_>,
    pattern_type: PatternType,
    tiers: &TierThresholds,
    mut matches: P,
) -> Option<PatternFinding>
where
    P: FnMut(&LeaveRecord) -> bool,
{
    let mut frequency = 0;
    let mut first_match = None;
    for record in &group.records {
        if matches(record) {
            frequency += 1;
            first_match.get_or_insert(record.start_date);
        }
    }

    let risk_level = tiers.classify(frequency)?;
    let last_occurrence_date = first_match?;

    Some(PatternFinding {
        employee_id: group.employee_id.to_string(),
        employee_name: group.employee_name(),
        department: group.department(),
        pattern_type,
        frequency,
        risk_level,
        detail_text: detail_text(pattern_type, frequency, risk_level),
        last_occurrence_date,
    })
}

fn detail_text(pattern_type: PatternType, frequency: usize, risk_level: RiskLevel) -> String {
    let what = match pattern_type {
        PatternType::MondayAbsence => "absences starting on a Monday",
        PatternType::FridayAbsence => "absences starting on a Friday",
        PatternType::ShortNotice => "leave requests filed one day or less before starting",
        PatternType::FrequentSingleDay => "single-day absences",
    };
    format!(
        "{} {} in the observation window ({} risk)",
        frequency, what, risk_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::models::LeaveStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A record filed two weeks ahead, lasting two days.
    fn create_record(employee_id: &str, start: NaiveDate) -> LeaveRecord {
        LeaveRecord {
            employee_id: employee_id.to_string(),
            employee_name: Some(format!("Employee {}", employee_id)),
            department: Some("Nursing".to_string()),
            start_date: start,
            end_date: start + Duration::days(1),
            duration: Decimal::new(2, 0),
            status: LeaveStatus::Approved,
            submitted_at: Utc.from_utc_datetime(
                &(start - Duration::days(14)).and_hms_opt(9, 0, 0).unwrap(),
            ),
        }
    }

    fn mondays(employee_id: &str, count: usize) -> Vec<LeaveRecord> {
        // 2026-01-05 is a Monday
        (0..count)
            .map(|i| create_record(employee_id, date(2026, 1, 5) + Duration::weeks(i as i64 * 3)))
            .collect()
    }

    fn filed_same_day(mut record: LeaveRecord) -> LeaveRecord {
        record.submitted_at = Utc.from_utc_datetime(&record.start_date.and_hms_opt(7, 0, 0).unwrap());
        record
    }

    fn single_day(mut record: LeaveRecord) -> LeaveRecord {
        record.end_date = record.start_date;
        record.duration = Decimal::ONE;
        record
    }

    /// PD-001: three Monday starts is a low finding
    #[test]
    fn test_three_mondays_is_low() {
        let findings = detect_patterns(&mondays("emp_001", 3));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].pattern_type, PatternType::MondayAbsence);
        assert_eq!(findings[0].frequency, 3);
        assert_eq!(findings[0].risk_level, RiskLevel::Low);
        assert_eq!(findings[0].employee_name, "Employee emp_001");
        assert_eq!(findings[0].department, "Nursing");
    }

    /// PD-002: four Monday starts is medium, five is high
    #[test]
    fn test_monday_tiers() {
        assert_eq!(detect_patterns(&mondays("e", 4))[0].risk_level, RiskLevel::Medium);
        assert_eq!(detect_patterns(&mondays("e", 5))[0].risk_level, RiskLevel::High);
        assert_eq!(detect_patterns(&mondays("e", 8))[0].risk_level, RiskLevel::High);
    }

    /// PD-003: two Monday starts is not a pattern
    #[test]
    fn test_two_mondays_no_finding() {
        assert!(detect_patterns(&mondays("emp_001", 2)).is_empty());
    }

    #[test]
    fn test_friday_rule() {
        // 2026-01-09 is a Friday
        let records: Vec<LeaveRecord> = (0..4)
            .map(|i| create_record("emp_002", date(2026, 1, 9) + Duration::weeks(i * 2)))
            .collect();
        let findings = detect_patterns(&records);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].pattern_type, PatternType::FridayAbsence);
        assert_eq!(findings[0].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_short_notice_rule() {
        // Wednesdays, so no weekday finding
        let records: Vec<LeaveRecord> = (0..3)
            .map(|i| filed_same_day(create_record("emp_003", date(2026, 1, 7) + Duration::weeks(i))))
            .collect();
        let findings = detect_patterns(&records);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].pattern_type, PatternType::ShortNotice);
        assert_eq!(findings[0].frequency, 3);
        assert_eq!(findings[0].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_frequent_single_day_thresholds() {
        let wednesdays = |n: i64| -> Vec<LeaveRecord> {
            (0..n)
                .map(|i| single_day(create_record("emp_004", date(2026, 1, 7) + Duration::weeks(i))))
                .collect()
        };

        assert!(detect_patterns(&wednesdays(3)).is_empty());
        assert_eq!(detect_patterns(&wednesdays(4))[0].risk_level, RiskLevel::Low);
        assert_eq!(detect_patterns(&wednesdays(5))[0].risk_level, RiskLevel::Medium);
        let six = detect_patterns(&wednesdays(6));
        assert_eq!(six[0].pattern_type, PatternType::FrequentSingleDay);
        assert_eq!(six[0].risk_level, RiskLevel::High);
    }

    #[test]
    fn test_half_day_counts_as_single_day() {
        let records: Vec<LeaveRecord> = (0..4)
            .map(|i| {
                let mut r = single_day(create_record("emp_005", date(2026, 1, 7) + Duration::weeks(i)));
                r.duration = Decimal::new(5, 1);
                r
            })
            .collect();
        assert_eq!(detect_patterns(&records)[0].pattern_type, PatternType::FrequentSingleDay);
    }

    #[test]
    fn test_single_record_employee_is_skipped() {
        let mut config = PatternConfig::default();
        config.weekday.low = 1;
        config.weekday.medium = 1;
        config.weekday.high = 1;
        let records = mondays("emp_006", 1);

        assert!(detect_patterns_with(&records, &config).is_empty());
    }

    #[test]
    fn test_last_occurrence_is_first_match_in_input_order() {
        let mut records = mondays("emp_007", 3);
        records.reverse();
        let expected = records[0].start_date;

        let findings = detect_patterns(&records);
        assert_eq!(findings[0].last_occurrence_date, expected);
        assert_eq!(expected, date(2026, 2, 16));
    }

    #[test]
    fn test_one_employee_can_have_several_findings() {
        let records: Vec<LeaveRecord> = mondays("emp_008", 5)
            .into_iter()
            .map(|r| single_day(filed_same_day(r)))
            .collect();
        let findings = detect_patterns(&records);

        let types: Vec<PatternType> = findings.iter().map(|f| f.pattern_type).collect();
        assert_eq!(
            types,
            vec![PatternType::MondayAbsence, PatternType::ShortNotice, PatternType::FrequentSingleDay]
        );
        assert_eq!(findings[0].risk_level, RiskLevel::High);
        assert_eq!(findings[2].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_all_four_rules_keep_rule_order_within_a_level() {
        // 2026-01-09 is a Friday
        let fridays = (0..3).map(|i| create_record("emp_011", date(2026, 1, 9) + Duration::weeks(i * 3)));
        let records: Vec<LeaveRecord> = mondays("emp_011", 3)
            .into_iter()
            .chain(fridays)
            .map(|r| single_day(filed_same_day(r)))
            .collect();

        let findings = detect_patterns(&records);
        let found: Vec<(PatternType, RiskLevel)> =
            findings.iter().map(|f| (f.pattern_type, f.risk_level)).collect();

        assert_eq!(
            found,
            vec![
                (PatternType::ShortNotice, RiskLevel::High),
                (PatternType::FrequentSingleDay, RiskLevel::High),
                (PatternType::MondayAbsence, RiskLevel::Low),
                (PatternType::FridayAbsence, RiskLevel::Low),
            ]
        );
    }

    #[test]
    fn test_findings_sorted_by_risk_across_employees() {
        let mut records = mondays("low", 3);
        records.extend(mondays("high", 5));
        records.extend(mondays("medium", 4));

        let ids: Vec<String> = detect_patterns(&records)
            .into_iter()
            .map(|f| f.employee_id)
            .collect();
        assert_eq!(ids, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_missing_department_reported_as_unknown() {
        let records: Vec<LeaveRecord> = mondays("emp_009", 3)
            .into_iter()
            .map(|mut r| {
                r.department = None;
                r.employee_name = None;
                r
            })
            .collect();
        let findings = detect_patterns(&records);

        assert_eq!(findings[0].department, "Unknown");
        assert_eq!(findings[0].employee_name, "Unknown");
    }

    #[test]
    fn test_detail_text_mentions_count_and_level() {
        let findings = detect_patterns(&mondays("emp_010", 4));
        assert!(findings[0].detail_text.contains("4 absences starting on a Monday"));
        assert!(findings[0].detail_text.contains("medium"));
    }
}
