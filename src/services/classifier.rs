//! Intervention classification.
//!
//! Applies the frequency x severity x trend decision matrix to decide
//! whether a road needs intervention and at which priority tier. The
//! matrix is evaluated top-down and the first matching rule wins; the
//! rule order is the tie-break policy. Every threshold is a contract
//! value, not a placeholder.

use crate::api::{CongestionMetrics, PriorityTier, Problem, ProblemSeverity, TrafficPattern, Trend};

/// Rule 1: congestion on almost every observed day.
pub(crate) const CRITICAL_FREQUENCY: f64 = 0.86;
const CRITICAL_MAX_CONGESTION: f64 = 0.90;

/// Rule 2: severe congestion on most days.
pub(crate) const SEVERE_FREQUENCY: f64 = 0.71;
pub(crate) const SEVERE_AVG_CONGESTION: f64 = 0.70;

/// Rules 3 and 4: recurring congestion.
pub(crate) const REGULAR_FREQUENCY: f64 = 0.57;
const REGULAR_AVG_CONGESTION: f64 = 0.60;

/// Rules 5 and 6: occasional spikes and growth concerns.
const SPIKE_MAX_CONGESTION: f64 = 0.90;
const OCCASIONAL_FREQUENCY: f64 = 0.30;

/// Classifier output.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub needs_intervention: bool,
    pub reason: String,
    pub priority: PriorityTier,
}

impl Classification {
    fn intervene(priority: PriorityTier, reason: &str) -> Self {
        Self {
            needs_intervention: true,
            reason: reason.to_string(),
            priority,
        }
    }
}

/// Classify a road from its derived pattern and metrics.
pub fn classify(pattern: &TrafficPattern, metrics: &CongestionMetrics) -> Classification {
    let frequency = pattern.frequency_score;

    if frequency >= CRITICAL_FREQUENCY && metrics.max_congestion >= CRITICAL_MAX_CONGESTION {
        return Classification::intervene(PriorityTier::Critical, "daily extreme congestion");
    }
    if frequency >= SEVERE_FREQUENCY && metrics.avg_congestion >= SEVERE_AVG_CONGESTION {
        return Classification::intervene(
            PriorityTier::High,
            "regular severe congestion; plan widening",
        );
    }
    if frequency >= REGULAR_FREQUENCY && metrics.avg_congestion >= REGULAR_AVG_CONGESTION {
        return Classification::intervene(
            PriorityTier::High,
            "regular congestion; optimize signals or widen",
        );
    }
    if frequency >= REGULAR_FREQUENCY {
        return Classification::intervene(PriorityTier::Medium, "recurring pattern; plan intervention");
    }
    if metrics.max_congestion >= SPIKE_MAX_CONGESTION && frequency >= OCCASIONAL_FREQUENCY {
        return Classification::intervene(PriorityTier::Medium, "occasional severe congestion");
    }
    if pattern.trend == Trend::Increasing && frequency >= OCCASIONAL_FREQUENCY {
        return Classification::intervene(
            PriorityTier::Medium,
            "growth concern; reserve right-of-way",
        );
    }

    Classification {
        needs_intervention: false,
        reason: "traffic within acceptable limits".to_string(),
        priority: PriorityTier::Monitor,
    }
}

/// Deterministic problem records for a road needing intervention.
pub fn identify_problems(
    pattern: &TrafficPattern,
    metrics: &CongestionMetrics,
    needs_intervention: bool,
) -> Vec<Problem> {
    if !needs_intervention {
        return Vec::new();
    }

    let mut problems = Vec::new();
    let avg = metrics.avg_congestion;

    if avg >= 0.6 {
        let severity = if avg >= 0.8 {
            ProblemSeverity::Critical
        } else if avg >= 0.7 {
            ProblemSeverity::High
        } else {
            ProblemSeverity::Medium
        };
        problems.push(Problem {
            problem_type: "congestion".to_string(),
            severity,
            description: format!(
                "Congestion on {} of {} observed days with {:.0}% average load",
                pattern.high_traffic_day_count,
                pattern.observed_days,
                avg * 100.0
            ),
            impact: format!(
                "Average delay of about {} minutes during peak hours",
                (avg * 30.0).round() as i64
            ),
        });
    }

    if pattern.frequency_score >= SEVERE_FREQUENCY && avg >= SEVERE_AVG_CONGESTION {
        problems.push(Problem {
            problem_type: "capacity".to_string(),
            severity: ProblemSeverity::High,
            description: "Road capacity insufficient for recurring traffic volume".to_string(),
            impact: "Bottleneck delays propagate along the corridor".to_string(),
        });
    }

    problems
}
