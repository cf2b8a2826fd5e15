//! Calendar helpers shared by the analyzers.
//!
//! This module classifies start dates by weekday, measures notice periods,
//! and builds the calendar-month windows the trend rules compare.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::models::LeaveRecord;

/// Leave filed this many calendar days or fewer before it starts is short notice.
///
/// Backfilled entries (filed after the start date) count as short notice.
pub const SHORT_NOTICE_MAX_DAYS: i64 = 1;

/// Returns true if `date` is a Monday.
pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Returns true if `date` is a Friday.
pub fn is_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri
}

/// Returns true if `date` is a Monday or a Friday.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::is_monday_or_friday;
/// use chrono::NaiveDate;
///
/// assert!(is_monday_or_friday(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())); // Monday
/// assert!(!is_monday_or_friday(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap())); // Wednesday
/// ```
pub fn is_monday_or_friday(date: NaiveDate) -> bool {
    is_monday(date) || is_friday(date)
}

/// Returns true if the record was filed at short notice.
pub fn is_short_notice(record: &LeaveRecord) -> bool {
    record.notice_days() <= SHORT_NOTICE_MAX_DAYS
}

/// Returns true if `date` falls within the `days` days up to and including `reference`.
pub fn is_within_trailing_days(date: NaiveDate, reference: NaiveDate, days: i64) -> bool {
    let days_before = (reference - date).num_days();
    (0..=days).contains(&days_before)
}

/// Walks forward from `from` (inclusive) to the first Monday or Friday.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::next_monday_or_friday;
/// use chrono::NaiveDate;
///
/// let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// assert_eq!(next_monday_or_friday(wednesday), NaiveDate::from_ymd_opt(2026, 3, 6).unwrap());
/// ```
pub fn next_monday_or_friday(from: NaiveDate) -> NaiveDate {
    from.iter_days()
        .take(7)
        .find(|d| is_monday_or_friday(*d))
        .unwrap_or(from)
}

/// First day of the observation window ending at `reference`.
pub fn observation_window_start(reference: NaiveDate, months: u32) -> NaiveDate {
    reference
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// A half-open calendar month range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// First day of the month.
    pub start: NaiveDate,
    /// First day of the following month.
    pub end: NaiveDate,
}

impl MonthWindow {
    /// The calendar month `months_back` months before the one containing `reference`.
    pub fn months_before(reference: NaiveDate, months_back: u32) -> Self {
        let first = reference.with_day(1).unwrap_or(reference);
        let start = first
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(NaiveDate::MIN);
        let end = start
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Returns true if `date` is inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Calendar month number (1-12).
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// Counts records starting inside the window.
    pub fn count(&self, records: &[LeaveRecord]) -> usize {
        records.iter().filter(|r| self.contains(r.start_date)).count()
    }
}

/// The three adjacent months the trend rules compare.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::MonthWindows;
/// use chrono::NaiveDate;
///
/// let windows = MonthWindows::for_reference(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert_eq!(windows.current.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(windows.last.start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
/// assert_eq!(windows.two_months_ago.end, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindows {
    /// The month containing the reference date.
    pub current: MonthWindow,
    /// The month before it.
    pub last: MonthWindow,
    /// The month before that.
    pub two_months_ago: MonthWindow,
}

impl MonthWindows {
    /// Builds the windows around `reference`.
    pub fn for_reference(reference: NaiveDate) -> Self {
        Self {
            current: MonthWindow::months_before(reference, 0),
            last: MonthWindow::months_before(reference, 1),
            two_months_ago: MonthWindow::months_before(reference, 2),
        }
    }
}
