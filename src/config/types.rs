//! Configuration types for absence analytics.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML. Every field has a default, so a partial file
//! (or no file at all) yields the standard thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RiskLevel;

/// Count thresholds that map a match count onto a [`RiskLevel`].
///
/// # Example
///
/// ```
/// use absence_engine::config::TierThresholds;
/// use absence_engine::models::RiskLevel;
///
/// let tiers = TierThresholds { low: 3, medium: 4, high: 5 };
/// assert_eq!(tiers.classify(2), None);
/// assert_eq!(tiers.classify(3), Some(RiskLevel::Low));
/// assert_eq!(tiers.classify(4), Some(RiskLevel::Medium));
/// assert_eq!(tiers.classify(9), Some(RiskLevel::High));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Minimum count for a finding at all.
    pub low: usize,
    /// Minimum count for a medium finding.
    pub medium: usize,
    /// Minimum count for a high finding.
    pub high: usize,
}

impl TierThresholds {
    /// Returns the risk level for `count`, or `None` below the `low` threshold.
    pub fn classify(&self, count: usize) -> Option<RiskLevel> {
        if count >= self.high {
            Some(RiskLevel::High)
        } else if count >= self.medium {
            Some(RiskLevel::Medium)
        } else if count >= self.low {
            Some(RiskLevel::Low)
        } else {
            None
        }
    }

    fn validate(&self, field: &str) -> EngineResult<()> {
        if self.low == 0 || self.low > self.medium || self.medium > self.high {
            return Err(EngineError::InvalidConfig {
                field: field.to_string(),
                message: format!(
                    "tiers must satisfy 0 < low <= medium <= high (got {}/{}/{})",
                    self.low, self.medium, self.high
                ),
            });
        }
        Ok(())
    }
}

/// Thresholds for the pattern detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Employees with fewer records than this are skipped.
    pub min_records_per_employee: usize,
    /// Tiers for Monday and Friday start counts.
    pub weekday: TierThresholds,
    /// Tiers for short-notice filings.
    pub short_notice: TierThresholds,
    /// Tiers for single-day absences.
    pub single_day: TierThresholds,
    /// Longest duration, in days, still counted as a single-day absence.
    pub single_day_max_duration: Decimal,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_records_per_employee: 2,
            weekday: TierThresholds {
                low: 3,
                medium: 4,
                high: 5,
            },
            short_notice: TierThresholds {
                low: 3,
                medium: 4,
                high: 5,
            },
            single_day: TierThresholds {
                low: 4,
                medium: 5,
                high: 6,
            },
            single_day_max_duration: Decimal::ONE,
        }
    }
}

/// Weights and gates for the no-show risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Probability every employee starts from.
    pub base_probability: Decimal,
    /// Upper clamp for the probability.
    pub probability_ceiling: Decimal,
    /// Predictions below this probability are not emitted.
    pub emission_floor: Decimal,
    /// Predictions with fewer factors than this are not emitted.
    pub min_factors: usize,
    /// Probabilities above this get the proactive check-in recommendation.
    pub check_in_threshold: Decimal,
    /// Short-notice filings needed for the short-notice factor.
    pub short_notice_min: usize,
    /// Weight of the short-notice factor.
    pub short_notice_weight: Decimal,
    /// Monday or Friday starts needed for the weekend extension factor.
    pub weekend_extension_min: usize,
    /// Weight of the weekend extension factor.
    pub weekend_extension_weight: Decimal,
    /// Records in the window needed for the high frequency factor.
    pub high_frequency_min: usize,
    /// Weight of the high frequency factor.
    pub high_frequency_weight: Decimal,
    /// Trailing days before the reference date counted as recent.
    pub recent_window_days: i64,
    /// Recent records needed for the recent spike factor.
    pub recent_spike_min: usize,
    /// Weight of the recent spike factor.
    pub recent_spike_weight: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            base_probability: Decimal::new(20, 2),
            probability_ceiling: Decimal::new(90, 2),
            emission_floor: Decimal::new(40, 2),
            min_factors: 2,
            check_in_threshold: Decimal::new(60, 2),
            short_notice_min: 3,
            short_notice_weight: Decimal::new(15, 2),
            weekend_extension_min: 3,
            weekend_extension_weight: Decimal::new(20, 2),
            high_frequency_min: 6,
            high_frequency_weight: Decimal::new(15, 2),
            recent_window_days: 30,
            recent_spike_min: 2,
            recent_spike_weight: Decimal::new(10, 2),
        }
    }
}

/// Ratios and minimum counts for the month-over-month trend rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Current month must exceed last month by this factor to count as a spike.
    pub spike_ratio: Decimal,
    /// Spikes above this factor are critical.
    pub spike_critical_ratio: Decimal,
    /// Minimum current-month records for a spike.
    pub spike_min_count: usize,
    /// Minimum current-month records for a department alert.
    pub department_min_count: usize,
    /// Department must exceed its last month by this factor.
    pub department_ratio: Decimal,
    /// Department alerts at or above this count are critical.
    pub department_critical_count: usize,
    /// Monday/Friday starts must exceed other starts times this factor.
    pub concentration_ratio: Decimal,
    /// Minimum Monday/Friday starts for a concentration alert.
    pub concentration_min_count: usize,
    /// Calendar months (1-12) with known seasonal absence peaks.
    pub seasonal_months: Vec<u32>,
    /// Current month must exceed last month by this factor in a seasonal month.
    pub seasonal_ratio: Decimal,
    /// Minimum current-month records for a seasonal alert.
    pub seasonal_min_count: usize,
    /// Minimum last-month records before a decline is reported.
    pub improving_min_previous: usize,
    /// Current month must fall below last month times this factor.
    pub improving_ratio: Decimal,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            spike_ratio: Decimal::new(13, 1),
            spike_critical_ratio: Decimal::new(15, 1),
            spike_min_count: 5,
            department_min_count: 3,
            department_ratio: Decimal::new(15, 1),
            department_critical_count: 5,
            concentration_ratio: Decimal::new(8, 1),
            concentration_min_count: 5,
            seasonal_months: vec![1, 7, 12],
            seasonal_ratio: Decimal::new(12, 1),
            seasonal_min_count: 4,
            improving_min_previous: 5,
            improving_ratio: Decimal::new(7, 1),
        }
    }
}

/// The complete analytics configuration.
///
/// # Example
///
/// ```
/// use absence_engine::config::AnalyticsConfig;
///
/// let config = AnalyticsConfig::default();
/// assert_eq!(config.observation_window_months, 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Length of the trailing observation window, in calendar months.
    pub observation_window_months: u32,
    /// Pattern detector thresholds.
    pub patterns: PatternConfig,
    /// Risk scorer weights and gates.
    pub risk: RiskConfig,
    /// Trend analyzer ratios.
    pub trends: TrendConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            observation_window_months: 6,
            patterns: PatternConfig::default(),
            risk: RiskConfig::default(),
            trends: TrendConfig::default(),
        }
    }
}

impl PatternConfig {
    fn validate(&self) -> EngineResult<()> {
        require_count("patterns.min_records_per_employee", self.min_records_per_employee)?;
        self.weekday.validate("patterns.weekday")?;
        self.short_notice.validate("patterns.short_notice")?;
        self.single_day.validate("patterns.single_day")?;
        require_positive("patterns.single_day_max_duration", self.single_day_max_duration)
    }
}

impl RiskConfig {
    fn validate(&self) -> EngineResult<()> {
        require_non_negative("risk.base_probability", self.base_probability)?;
        if self.probability_ceiling < self.base_probability || self.probability_ceiling > Decimal::ONE {
            return Err(invalid(
                "risk.probability_ceiling",
                "must lie between risk.base_probability and 1",
            ));
        }
        if self.emission_floor < self.base_probability {
            return Err(invalid(
                "risk.emission_floor",
                "must not be below risk.base_probability",
            ));
        }
        require_count("risk.min_factors", self.min_factors)?;
        if self.recent_window_days <= 0 {
            return Err(invalid("risk.recent_window_days", "must be positive"));
        }

        require_count("risk.short_notice_min", self.short_notice_min)?;
        require_count("risk.weekend_extension_min", self.weekend_extension_min)?;
        require_count("risk.high_frequency_min", self.high_frequency_min)?;
        require_count("risk.recent_spike_min", self.recent_spike_min)?;

        require_non_negative("risk.short_notice_weight", self.short_notice_weight)?;
        require_non_negative("risk.weekend_extension_weight", self.weekend_extension_weight)?;
        require_non_negative("risk.high_frequency_weight", self.high_frequency_weight)?;
        require_non_negative("risk.recent_spike_weight", self.recent_spike_weight)
    }
}

impl TrendConfig {
    fn validate(&self) -> EngineResult<()> {
        require_positive("trends.spike_ratio", self.spike_ratio)?;
        require_positive("trends.spike_critical_ratio", self.spike_critical_ratio)?;
        require_positive("trends.department_ratio", self.department_ratio)?;
        require_positive("trends.concentration_ratio", self.concentration_ratio)?;
        require_positive("trends.seasonal_ratio", self.seasonal_ratio)?;
        require_positive("trends.improving_ratio", self.improving_ratio)?;

        require_count("trends.spike_min_count", self.spike_min_count)?;
        require_count("trends.department_min_count", self.department_min_count)?;
        require_count("trends.department_critical_count", self.department_critical_count)?;
        require_count("trends.concentration_min_count", self.concentration_min_count)?;
        require_count("trends.seasonal_min_count", self.seasonal_min_count)?;
        require_count("trends.improving_min_previous", self.improving_min_previous)?;

        if let Some(month) = self.seasonal_months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(invalid(
                "trends.seasonal_months",
                &format!("{} is not a calendar month", month),
            ));
        }
        Ok(())
    }
}

impl AnalyticsConfig {
    /// Checks the values the analyzers rely on.
    ///
    /// Minimum counts must be at least 1, weights must not be negative and
    /// ratios must be positive. The emission floor and ceiling must bracket
    /// the base probability, so every emitted probability stays between the
    /// base and the ceiling.
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.observation_window_months == 0 {
            return Err(invalid(
                "observation_window_months",
                "must be at least one month",
            ));
        }

        self.patterns.validate()?;
        self.risk.validate()?;
        self.trends.validate()
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn require_count(field: &str, value: usize) -> EngineResult<()> {
    if value == 0 {
        return Err(invalid(field, "must be at least 1"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, &format!("must not be negative (got {})", value)));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, &format!("must be positive (got {})", value)));
    }
    Ok(())
}
