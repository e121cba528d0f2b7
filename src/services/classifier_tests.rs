#[cfg(test)]
mod tests {
    use crate::api::{CongestionMetrics, PriorityTier, TrafficPattern, Trend};
    use crate::services::classifier::{classify, identify_problems};

    fn pattern(frequency: f64, trend: Trend) -> TrafficPattern {
        TrafficPattern {
            frequency_score: frequency,
            high_traffic_day_count: (frequency * 30.0).round() as u32,
            observed_days: 30,
            peak_hours: vec![8, 9, 18],
            trend,
            weekly_average: vec![],
        }
    }

    fn metrics(avg: f64, max: f64) -> CongestionMetrics {
        CongestionMetrics {
            avg_congestion: avg,
            max_congestion: max,
            peak_congestion: max,
        }
    }

    #[test]
    fn test_rule1_critical() {
        let c = classify(&pattern(0.9, Trend::Stable), &metrics(0.6, 0.95));
        assert_eq!(c.priority, PriorityTier::Critical);
        assert!(c.needs_intervention);
        assert_eq!(c.reason, "daily extreme congestion");
    }

    #[test]
    fn test_rule1_wins_over_rule2() {
        // Input satisfies both rule 1 (freq >= 0.86, max >= 0.90) and
        // rule 2 (freq >= 0.71, avg >= 0.70). The earlier rule must win.
        let c = classify(&pattern(0.9, Trend::Stable), &metrics(0.75, 0.95));
        assert_eq!(c.priority, PriorityTier::Critical);
        assert_eq!(c.reason, "daily extreme congestion");
    }

    #[test]
    fn test_rule2_high_severe() {
        let c = classify(&pattern(0.80, Trend::Stable), &metrics(0.75, 0.85));
        assert_eq!(c.priority, PriorityTier::High);
        assert_eq!(c.reason, "regular severe congestion; plan widening");
    }

    #[test]
    fn test_rule3_high_regular() {
        let c = classify(&pattern(0.60, Trend::Stable), &metrics(0.65, 0.85));
        assert_eq!(c.priority, PriorityTier::High);
        assert_eq!(c.reason, "regular congestion; optimize signals or widen");
    }

    #[test]
    fn test_rule4_medium_frequency_alone() {
        let c = classify(&pattern(0.60, Trend::Stable), &metrics(0.40, 0.55));
        assert_eq!(c.priority, PriorityTier::Medium);
        assert_eq!(c.reason, "recurring pattern; plan intervention");
    }

    #[test]
    fn test_rule5_medium_occasional_spike() {
        let c = classify(&pattern(0.35, Trend::Stable), &metrics(0.45, 0.95));
        assert_eq!(c.priority, PriorityTier::Medium);
        assert_eq!(c.reason, "occasional severe congestion");
    }

    #[test]
    fn test_rule6_medium_growth() {
        let c = classify(&pattern(0.35, Trend::Increasing), &metrics(0.45, 0.70));
        assert_eq!(c.priority, PriorityTier::Medium);
        assert_eq!(c.reason, "growth concern; reserve right-of-way");
    }

    #[test]
    fn test_monitor_default() {
        let c = classify(&pattern(0.10, Trend::Stable), &metrics(0.30, 0.50));
        assert_eq!(c.priority, PriorityTier::Monitor);
        assert!(!c.needs_intervention);
        assert_eq!(c.reason, "traffic within acceptable limits");
    }

    #[test]
    fn test_exact_boundaries_fire() {
        // Thresholds are inclusive.
        let c = classify(&pattern(0.86, Trend::Stable), &metrics(0.50, 0.90));
        assert_eq!(c.priority, PriorityTier::Critical);

        let c = classify(&pattern(0.71, Trend::Stable), &metrics(0.70, 0.80));
        assert_eq!(c.priority, PriorityTier::High);

        let c = classify(&pattern(0.57, Trend::Stable), &metrics(0.10, 0.20));
        assert_eq!(c.priority, PriorityTier::Medium);
    }

    #[test]
    fn test_just_below_boundaries_fall_through() {
        // Below rule 1's frequency bound with rule 2's congestion profile.
        let c = classify(&pattern(0.85, Trend::Stable), &metrics(0.75, 0.95));
        assert_eq!(c.priority, PriorityTier::High);

        // Below every frequency bound with no spike and no growth.
        let c = classify(&pattern(0.29, Trend::Increasing), &metrics(0.50, 0.89));
        assert_eq!(c.priority, PriorityTier::Monitor);
    }

    #[test]
    fn test_increasing_trend_without_frequency_is_monitor() {
        let c = classify(&pattern(0.10, Trend::Increasing), &metrics(0.40, 0.60));
        assert_eq!(c.priority, PriorityTier::Monitor);
    }

    #[test]
    fn test_problems_empty_without_intervention() {
        let problems = identify_problems(&pattern(0.1, Trend::Stable), &metrics(0.9, 0.9), false);
        assert!(problems.is_empty());
    }

    #[test]
    fn test_problems_congestion_and_capacity() {
        let p = pattern(0.80, Trend::Stable);
        let m = metrics(0.75, 0.9);
        let problems = identify_problems(&p, &m, true);
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].problem_type, "congestion");
        assert!(problems[0].description.contains("24 of 30 observed days"));
        assert_eq!(problems[1].problem_type, "capacity");
    }

    #[test]
    fn test_problems_low_average_yields_none() {
        let problems = identify_problems(&pattern(0.35, Trend::Stable), &metrics(0.45, 0.95), true);
        assert!(problems.is_empty());
    }
}
