//! No-show risk scoring.
//!
//! Each employee starts from a base probability that contributing factors
//! raise additively. Only employees that clear both the probability floor
//! and the minimum factor count get a prediction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RiskConfig;
use crate::models::{ContributingFactor, LeaveRecord, NoShowPrediction};

use super::calendar::{
    is_monday_or_friday, is_short_notice, is_within_trailing_days, next_monday_or_friday,
};
use super::grouping::{EmployeeGroup, group_by_employee};
use super::ranking::rank_predictions;

/// Recommendation for probabilities above the check-in threshold.
pub const CHECK_IN_RECOMMENDATION: &str =
    "Consider a proactive check-in to discuss workload, wellbeing and upcoming leave plans.";

/// Recommendation for probabilities at or below the check-in threshold.
pub const MONITOR_RECOMMENDATION: &str =
    "Monitor attendance patterns and revisit if further short-notice absences occur.";

/// Predicts no-shows using the default weights.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::predict_no_shows;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// assert!(predict_no_shows(&[], today).is_empty());
/// ```
pub fn predict_no_shows(records: &[LeaveRecord], reference_date: NaiveDate) -> Vec<NoShowPrediction> {
    predict_no_shows_with(records, reference_date, &RiskConfig::default())
}

/// Predicts no-shows with custom weights and gates.
///
/// Every employee is scored, including those with a single record. The
/// predicted date is the first Monday or Friday on or after
/// `reference_date`, the same for every employee. The result is ordered by
/// probability, highest first.
pub fn predict_no_shows_with(
    records: &[LeaveRecord],
    reference_date: NaiveDate,
    config: &RiskConfig,
) -> Vec<NoShowPrediction> {
    let predicted_date = next_monday_or_friday(reference_date);

    let mut predictions: Vec<NoShowPrediction> = group_by_employee(records)
        .iter()
        .filter_map(|group| score_employee(group, reference_date, predicted_date, config))
        .collect();

    rank_predictions(&mut predictions);
    predictions
}

fn score_employee(
    group: &EmployeeGroup<'_>,
    reference_date: NaiveDate,
    predicted_date: NaiveDate,
    config: &RiskConfig,
) -> Option<NoShowPrediction> {
    let mut probability = config.base_probability;
    let mut factors = Vec::new();

    let mut apply = |met: bool, weight: Decimal, factor: ContributingFactor| {
        if met {
            probability += weight;
            factors.push(factor);
        }
    };

    apply(
        group.count_where(is_short_notice) >= config.short_notice_min,
        config.short_notice_weight,
        ContributingFactor::ShortNoticeHistory,
    );
    apply(
        group.count_where(|r| is_monday_or_friday(r.start_date)) >= config.weekend_extension_min,
        config.weekend_extension_weight,
        ContributingFactor::WeekendExtension,
    );
    apply(
        group.len() >= config.high_frequency_min,
        config.high_frequency_weight,
        ContributingFactor::HighFrequency,
    );
    apply(
        group.count_where(|r| {
            is_within_trailing_days(r.start_date, reference_date, config.recent_window_days)
        }) >= config.recent_spike_min,
        config.recent_spike_weight,
        ContributingFactor::RecentSpike,
    );

    let probability = probability.min(config.probability_ceiling);

    if probability < config.emission_floor || factors.len() < config.min_factors {
        return None;
    }

    debug!(
        employee_id = group.employee_id,
        probability = %probability,
        factors = factors.len(),
        "No-show prediction emitted"
    );

    let recommendation_text = if probability > config.check_in_threshold {
        CHECK_IN_RECOMMENDATION
    } else {
        MONITOR_RECOMMENDATION
    };

    Some(NoShowPrediction {
        employee_id: group.employee_id.to_string(),
        employee_name: group.employee_name(),
        department: group.department(),
        predicted_date,
        probability,
        contributing_factors: factors,
        recommendation_text: recommendation_text.to_string(),
    })
}
