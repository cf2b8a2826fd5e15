//! Result ranking.
//!
//! All three result sets are ordered through [`stable_rank`], so ties keep
//! their input order everywhere.

use std::cmp::Reverse;

use crate::models::{NoShowPrediction, PatternFinding, TrendAlert};

/// Sorts `items` by `key`, keeping the input order of equal keys.
///
/// # Example
///
/// ```
/// use absence_engine::analysis::stable_rank;
///
/// let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// stable_rank(&mut items, |(rank, _)| *rank);
/// assert_eq!(items, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn stable_rank<T, K, F>(items: &mut [T], key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    items.sort_by_key(key);
}

/// Orders findings high, medium, low.
pub fn rank_findings(findings: &mut [PatternFinding]) {
    stable_rank(findings, |f| f.risk_level.priority());
}

/// Orders predictions by probability, highest first.
pub fn rank_predictions(predictions: &mut [NoShowPrediction]) {
    stable_rank(predictions, |p| Reverse(p.probability));
}

/// Orders alerts critical, warning, info.
pub fn rank_alerts(alerts: &mut [TrendAlert]) {
    stable_rank(alerts, |a| a.severity.priority());
}
