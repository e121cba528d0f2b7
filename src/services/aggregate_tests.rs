#[cfg(test)]
mod tests {
    use crate::api::{
        AreaId, CongestionMetrics, MonthsRange, PriorityTier, Recommendation,
        RecommendationPriority, RecommendationType, RoadAnalysis, RoadId, RoadMetadata, RoadType,
        TrafficPattern, Trend,
    };
    use crate::services::aggregate::aggregate_area;

    fn recommendation(cost: f64) -> Recommendation {
        Recommendation {
            recommendation_type: RecommendationType::Widening,
            priority: RecommendationPriority::High,
            title: "Widen".to_string(),
            description: String::new(),
            reason: String::new(),
            estimated_cost_crore: cost,
            timeline_months: MonthsRange::new(12, 18),
            expected_impact: String::new(),
            implementation_phases: vec![],
        }
    }

    fn analysis(
        id: &str,
        frequency: f64,
        avg: f64,
        priority: PriorityTier,
        score: u8,
        costs: &[f64],
    ) -> RoadAnalysis {
        RoadAnalysis {
            road_id: RoadId::new(id),
            road: RoadMetadata {
                id: RoadId::new(id),
                area_id: AreaId::new("a1"),
                name: format!("Road {}", id),
                road_type: RoadType::Primary,
                length_km: 4.0,
                lanes: 2,
                intersections: None,
                geometry: vec![],
            },
            traffic_pattern: TrafficPattern {
                frequency_score: frequency,
                high_traffic_day_count: (frequency * 30.0).round() as u32,
                observed_days: 30,
                peak_hours: vec![8, 18],
                trend: Trend::Stable,
                weekly_average: vec![],
            },
            congestion_metrics: CongestionMetrics {
                avg_congestion: avg,
                max_congestion: avg,
                peak_congestion: avg,
            },
            needs_intervention: priority != PriorityTier::Monitor,
            intervention_reason: String::new(),
            priority,
            priority_score: score,
            problems: vec![],
            recommendations: costs.iter().map(|&c| recommendation(c)).collect(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_empty_input_zero_insights() {
        let insights = aggregate_area(&[]);
        assert_eq!(insights.total_roads_analyzed, 0);
        assert_eq!(insights.roads_needing_intervention, 0);
        assert_eq!(insights.intervention_rate_pct, 0.0);
        assert_eq!(insights.total_estimated_cost_crore, 0.0);
        assert!(insights.hotspots.is_empty());
        assert!(insights.recommended_phasing.is_empty());
        assert_eq!(insights.area_metrics.peak_congestion_hour, None);
    }

    #[test]
    fn test_totals_and_rate() {
        let analyses = vec![
            analysis("r1", 0.9, 0.8, PriorityTier::Critical, 90, &[68.0, 0.15]),
            analysis("r2", 0.6, 0.6, PriorityTier::High, 65, &[12.0]),
            analysis("r3", 0.1, 0.2, PriorityTier::Monitor, 10, &[]),
        ];
        let insights = aggregate_area(&analyses);
        assert_eq!(insights.total_roads_analyzed, 3);
        assert_eq!(insights.roads_needing_intervention, 2);
        assert!((insights.intervention_rate_pct - 66.666).abs() < 0.01);
        assert!((insights.total_estimated_cost_crore - 80.15).abs() < 1e-9);
        assert_eq!(insights.priority_counts[&PriorityTier::Critical], 1);
        assert_eq!(insights.priority_counts[&PriorityTier::Monitor], 1);
        assert_eq!(
            insights.intervention_type_counts[&RecommendationType::Widening],
            3
        );
    }

    #[test]
    fn test_hotspots_descending_by_combined_score() {
        // Frequency 0.9 / 0.5 / 0.1 with matching severities must rank
        // in that order.
        let analyses = vec![
            analysis("low", 0.1, 0.1, PriorityTier::Monitor, 10, &[]),
            analysis("high", 0.9, 0.9, PriorityTier::Critical, 95, &[68.0]),
            analysis("mid", 0.5, 0.5, PriorityTier::Medium, 50, &[8.0]),
        ];
        let insights = aggregate_area(&analyses);
        let ids: Vec<&str> = insights
            .hotspots
            .iter()
            .map(|h| h.road_id.as_str())
            .collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_hotspot_tie_breaks_by_priority_score() {
        let analyses = vec![
            analysis("weaker", 0.6, 0.6, PriorityTier::High, 60, &[]),
            analysis("stronger", 0.6, 0.6, PriorityTier::High, 75, &[]),
        ];
        let insights = aggregate_area(&analyses);
        assert_eq!(insights.hotspots[0].road_id.as_str(), "stronger");
    }

    #[test]
    fn test_hotspots_capped_at_five() {
        let analyses: Vec<RoadAnalysis> = (0..8)
            .map(|i| {
                analysis(
                    &format!("r{}", i),
                    0.1 * f64::from(i),
                    0.5,
                    PriorityTier::Medium,
                    50,
                    &[],
                )
            })
            .collect();
        let insights = aggregate_area(&analyses);
        assert_eq!(insights.hotspots.len(), 5);
        assert_eq!(insights.hotspots[0].road_id.as_str(), "r7");
    }

    #[test]
    fn test_order_independence() {
        let mut forward = vec![
            analysis("r1", 0.9, 0.8, PriorityTier::Critical, 90, &[68.0]),
            analysis("r2", 0.6, 0.6, PriorityTier::High, 65, &[12.0]),
            analysis("r3", 0.6, 0.6, PriorityTier::High, 65, &[12.0]),
            analysis("r4", 0.1, 0.2, PriorityTier::Monitor, 10, &[]),
        ];
        let a = aggregate_area(&forward);
        forward.reverse();
        let b = aggregate_area(&forward);
        assert_eq!(a, b);
    }

    #[test]
    fn test_phasing_groups_by_tier() {
        let analyses = vec![
            analysis("r1", 0.9, 0.8, PriorityTier::Critical, 90, &[68.0]),
            analysis("r2", 0.8, 0.7, PriorityTier::High, 70, &[34.0]),
            analysis("r3", 0.6, 0.5, PriorityTier::Medium, 50, &[8.0]),
            analysis("r4", 0.6, 0.5, PriorityTier::Medium, 55, &[6.0]),
            analysis("r5", 0.1, 0.2, PriorityTier::Monitor, 10, &[]),
        ];
        let insights = aggregate_area(&analyses);
        assert_eq!(insights.recommended_phasing.len(), 3);

        let phase1 = &insights.recommended_phasing[0];
        assert_eq!(phase1.phase, 1);
        assert_eq!(phase1.road_names, vec!["Road r1"]);
        assert!((phase1.subtotal_cost_crore - 68.0).abs() < 1e-9);

        let phase3 = &insights.recommended_phasing[2];
        assert_eq!(phase3.phase, 3);
        // Ordered by priority score descending within the phase.
        assert_eq!(phase3.road_names, vec!["Road r4", "Road r3"]);
        assert!((phase3.subtotal_cost_crore - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_phasing_skips_empty_tiers() {
        let analyses = vec![analysis("r1", 0.6, 0.5, PriorityTier::Medium, 50, &[8.0])];
        let insights = aggregate_area(&analyses);
        assert_eq!(insights.recommended_phasing.len(), 1);
        assert_eq!(insights.recommended_phasing[0].phase, 3);
    }

    #[test]
    fn test_area_metrics_means_over_all_roads() {
        let analyses = vec![
            analysis("r1", 0.9, 0.8, PriorityTier::Critical, 90, &[]),
            analysis("r2", 0.1, 0.2, PriorityTier::Monitor, 10, &[]),
        ];
        let insights = aggregate_area(&analyses);
        assert!((insights.area_metrics.average_frequency - 0.5).abs() < 1e-9);
        assert!((insights.area_metrics.average_congestion - 0.5).abs() < 1e-9);
        assert_eq!(insights.area_metrics.peak_congestion_hour, Some(8));
    }
}
