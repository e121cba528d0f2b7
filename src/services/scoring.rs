//! Continuous priority scoring.
//!
//! Computes a 0-100 score from the same inputs as the classifier. The
//! score is an independent confirmation and ranking signal; it is not
//! derived from the rule-based tier and the two may disagree on edge
//! cases, which is deliberate (both are exposed to callers).

use crate::api::{CongestionMetrics, PriorityTier, TrafficPattern, Trend, WeekdayCongestion};

const FREQUENCY_WEIGHT: f64 = 40.0;
const SEVERITY_WEIGHT: f64 = 30.0;
const CONSISTENCY_WEIGHT: f64 = 20.0;
const TREND_WEIGHT: f64 = 10.0;

/// Weighted 0-100 priority score, rounded to the nearest integer.
pub fn priority_score(pattern: &TrafficPattern, metrics: &CongestionMetrics) -> u8 {
    let trend_bonus = match pattern.trend {
        Trend::Increasing => 1.0,
        Trend::Stable => 0.5,
        Trend::Decreasing => 0.0,
    };

    let score = pattern.frequency_score * FREQUENCY_WEIGHT
        + metrics.max_congestion * SEVERITY_WEIGHT
        + weekly_consistency(&pattern.weekly_average) * CONSISTENCY_WEIGHT
        + trend_bonus * TREND_WEIGHT;

    score.round().clamp(0.0, 100.0) as u8
}

/// Display tier for a score. Independent of the rule-matrix tier.
pub fn score_tier(score: u8) -> PriorityTier {
    match score {
        80..=u8::MAX => PriorityTier::Critical,
        60..=79 => PriorityTier::High,
        40..=59 => PriorityTier::Medium,
        20..=39 => PriorityTier::Low,
        _ => PriorityTier::Monitor,
    }
}

/// How uniform the weekday congestion profile is: 1 - population stddev
/// of the weekday averages, clamped to [0, 1]. Higher means the load is
/// chronic rather than incidental. No weekly data scores 0, keeping
/// empty roads in the monitor band.
fn weekly_consistency(weekly: &[WeekdayCongestion]) -> f64 {
    if weekly.is_empty() {
        return 0.0;
    }
    let n = weekly.len() as f64;
    let mean = weekly.iter().map(|w| w.avg_congestion).sum::<f64>() / n;
    let variance = weekly
        .iter()
        .map(|w| (w.avg_congestion - mean).powi(2))
        .sum::<f64>()
        / n;
    (1.0 - variance.sqrt()).clamp(0.0, 1.0)
}
