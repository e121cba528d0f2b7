//! Intervention recommendation generation.
//!
//! Given a classified road, produces concrete intervention proposals:
//! type, cost estimate, timeline and (for construction works) a phased
//! implementation plan. Costs are per-kilometre figures in crore
//! (10,000,000 INR); every reason string cites the metric that triggered
//! the proposal.

use crate::api::{
    CongestionMetrics, MonthsRange, PriorityTier, Recommendation, RecommendationPriority,
    RecommendationType, RoadMetadata, RoadType, TrafficPattern, Trend,
};
use crate::services::classifier::{REGULAR_FREQUENCY, SEVERE_FREQUENCY};

pub const WIDENING_COST_PER_KM_CRORE: f64 = 8.5;
pub const FLYOVER_COST_PER_KM_CRORE: f64 = 45.0;
pub const SIGNALS_COST_PER_INTERSECTION_CRORE: f64 = 0.15;
pub const PLANNING_COST_PER_KM_CRORE: f64 = 2.5;
pub const MAINTENANCE_COST_PER_KM_CRORE: f64 = 2.0;

/// Congestion level above which a widening case also warrants interim
/// signal retiming.
const INTERIM_SIGNALS_AVG_CONGESTION: f64 = 0.70;

/// Target lane count per road class.
pub fn recommended_lanes(road_type: RoadType) -> u32 {
    match road_type {
        RoadType::Highway => 6,
        RoadType::Primary => 4,
        RoadType::Secondary => 3,
        RoadType::Tertiary | RoadType::Residential => 2,
    }
}

/// Generate intervention proposals for one road.
///
/// Returns an empty list for monitor-tier roads. Types never repeat
/// within one road's list.
pub fn generate_recommendations(
    road: &RoadMetadata,
    pattern: &TrafficPattern,
    metrics: &CongestionMetrics,
    priority: PriorityTier,
) -> Vec<Recommendation> {
    if !matches!(
        priority,
        PriorityTier::Critical | PriorityTier::High | PriorityTier::Medium
    ) {
        return Vec::new();
    }

    let mut recommendations = Vec::new();
    let target_lanes = recommended_lanes(road.road_type);
    let primary_urgency = if matches!(priority, PriorityTier::Critical | PriorityTier::High) {
        RecommendationPriority::High
    } else {
        RecommendationPriority::Medium
    };

    match priority {
        PriorityTier::Critical => {
            if road.lanes >= target_lanes {
                recommendations.push(flyover(road, pattern, metrics, primary_urgency));
            } else if metrics.avg_congestion >= 0.8 || road.lanes <= 2 {
                recommendations.push(widening(road, pattern, target_lanes, primary_urgency));
            }
            // Critical roads outside both gates fall through to the
            // maintenance fallback below.
        }
        PriorityTier::High => {
            if pattern.frequency_score >= SEVERE_FREQUENCY {
                if road.lanes < target_lanes {
                    recommendations.push(widening(road, pattern, target_lanes, primary_urgency));
                } else {
                    recommendations.push(flyover(road, pattern, metrics, primary_urgency));
                }
            } else if pattern.frequency_score >= REGULAR_FREQUENCY {
                recommendations.push(signals(road, metrics, primary_urgency));
            }
        }
        PriorityTier::Medium => {
            if pattern.trend == Trend::Increasing {
                recommendations.push(planning(road, primary_urgency));
            }
        }
        _ => {}
    }

    // Interim measure alongside construction works: severe average load
    // can be partially recovered by signal retiming while the main
    // project is delivered.
    let has_construction = recommendations.iter().any(|r| {
        matches!(
            r.recommendation_type,
            RecommendationType::Widening | RecommendationType::Flyover
        )
    });
    if has_construction && metrics.avg_congestion >= INTERIM_SIGNALS_AVG_CONGESTION {
        recommendations.push(signals(road, metrics, RecommendationPriority::Medium));
    }

    if recommendations.is_empty() {
        recommendations.push(maintenance(road, pattern, primary_urgency));
    }

    recommendations
}

fn frequency_citation(pattern: &TrafficPattern) -> String {
    format!(
        "Congestion occurs on {} of {} observed days",
        pattern.high_traffic_day_count, pattern.observed_days
    )
}

fn widening(
    road: &RoadMetadata,
    pattern: &TrafficPattern,
    target_lanes: u32,
    priority: RecommendationPriority,
) -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::Widening,
        priority,
        title: format!(
            "Widen {} from {} to {} lanes",
            road.name, road.lanes, target_lanes
        ),
        description: format!(
            "Increase carriageway capacity from {} to {} lanes over {:.1} km",
            road.lanes, target_lanes, road.length_km
        ),
        reason: format!(
            "{}; current {} lanes are insufficient for the recurring volume",
            frequency_citation(pattern),
            road.lanes
        ),
        estimated_cost_crore: road.length_km * WIDENING_COST_PER_KM_CRORE,
        timeline_months: MonthsRange::new(12, 18),
        expected_impact: "Adds roughly 50% corridor capacity and shortens peak-hour delays"
            .to_string(),
        implementation_phases: vec![
            "Detailed project report and design".to_string(),
            "Land acquisition and utility relocation".to_string(),
            "Construction phase 1: one carriageway at a time".to_string(),
            "Construction phase 2: remaining carriageway".to_string(),
            "Commissioning and road marking".to_string(),
        ],
    }
}

fn flyover(
    road: &RoadMetadata,
    pattern: &TrafficPattern,
    metrics: &CongestionMetrics,
    priority: RecommendationPriority,
) -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::Flyover,
        priority,
        title: format!("Grade-separated flyover on {}", road.name),
        description: format!(
            "Construct a grade-separated flyover across the congested junctions of {}",
            road.name
        ),
        reason: format!(
            "{}; peak congestion reaches {:.0}% with the road already at {} lanes",
            frequency_citation(pattern),
            metrics.max_congestion * 100.0,
            road.lanes
        ),
        estimated_cost_crore: road.length_km * FLYOVER_COST_PER_KM_CRORE,
        timeline_months: MonthsRange::new(18, 30),
        expected_impact: "Removes junction conflicts and cuts intersection delay by 60-70%"
            .to_string(),
        implementation_phases: vec![
            "Detailed project report and design".to_string(),
            "Piling and foundations".to_string(),
            "Superstructure erection".to_string(),
            "Commissioning".to_string(),
        ],
    }
}

fn signals(
    road: &RoadMetadata,
    metrics: &CongestionMetrics,
    priority: RecommendationPriority,
) -> Recommendation {
    let intersections = road.intersections.unwrap_or(1);
    Recommendation {
        recommendation_type: RecommendationType::Signals,
        priority,
        title: format!("Adaptive signal optimization on {}", road.name),
        description: format!(
            "Retime and coordinate {} signalized intersection(s) with adaptive control",
            intersections
        ),
        reason: format!(
            "Average congestion at {:.0}% with recurring weekday peaks; signal retiming recovers capacity without civil works",
            metrics.avg_congestion * 100.0
        ),
        estimated_cost_crore: f64::from(intersections) * SIGNALS_COST_PER_INTERSECTION_CRORE,
        timeline_months: MonthsRange::new(3, 6),
        expected_impact: "Cuts average junction wait times by 20-30%".to_string(),
        implementation_phases: Vec::new(),
    }
}

fn planning(road: &RoadMetadata, priority: RecommendationPriority) -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::Planning,
        priority,
        title: format!("Reserve right-of-way along {}", road.name),
        description: format!(
            "Secure land along {:.1} km for future capacity expansion",
            road.length_km
        ),
        reason: "Congestion trend is increasing across the window; acquiring right-of-way now avoids costlier acquisition later".to_string(),
        estimated_cost_crore: road.length_km * PLANNING_COST_PER_KM_CRORE,
        timeline_months: MonthsRange::new(24, 60),
        expected_impact: "Protects a future widening corridor at land-acquisition-only cost"
            .to_string(),
        implementation_phases: Vec::new(),
    }
}

fn maintenance(
    road: &RoadMetadata,
    pattern: &TrafficPattern,
    priority: RecommendationPriority,
) -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::Maintenance,
        priority,
        title: format!("Surface rehabilitation on {}", road.name),
        description: format!("Resurface and restore drainage over {:.1} km", road.length_km),
        reason: format!(
            "{}; pavement wear under recurring load degrades throughput",
            frequency_citation(pattern)
        ),
        estimated_cost_crore: road.length_km * MAINTENANCE_COST_PER_KM_CRORE,
        timeline_months: MonthsRange::new(2, 4),
        expected_impact: "Restores ride quality and design speed".to_string(),
        implementation_phases: Vec::new(),
    }
}
