//! Area-level aggregation.
//!
//! Reduces all per-road analyses of an area into one [`AreaInsights`]:
//! hotspot ranking, total cost, per-tier counts and a phased
//! intervention plan. Pure single-threaded reduction; the result is
//! independent of the input ordering.

use std::collections::BTreeMap;

use crate::api::{
    AreaInsights, AreaMetrics, Hotspot, InterventionPhase, PriorityTier, RoadAnalysis,
};

/// Number of roads in the hotspot ranking.
const HOTSPOT_LIMIT: usize = 5;

const HOTSPOT_FREQUENCY_WEIGHT: f64 = 0.6;
const HOTSPOT_CONGESTION_WEIGHT: f64 = 0.4;

/// Combined frequency+severity ranking score for one road.
fn hotspot_score(analysis: &RoadAnalysis) -> f64 {
    analysis.traffic_pattern.frequency_score * HOTSPOT_FREQUENCY_WEIGHT
        + analysis.congestion_metrics.avg_congestion * HOTSPOT_CONGESTION_WEIGHT
}

/// Aggregate per-road analyses into area-wide insights.
///
/// Empty input yields zero-valued insights with no hotspots.
pub fn aggregate_area(analyses: &[RoadAnalysis]) -> AreaInsights {
    let total = analyses.len();
    let needing: Vec<&RoadAnalysis> = analyses.iter().filter(|a| a.needs_intervention).collect();

    let mut priority_counts: BTreeMap<PriorityTier, usize> = BTreeMap::new();
    for analysis in analyses {
        *priority_counts.entry(analysis.priority).or_insert(0) += 1;
    }

    let mut intervention_type_counts = BTreeMap::new();
    let mut total_cost = 0.0;
    for analysis in analyses {
        for rec in &analysis.recommendations {
            *intervention_type_counts
                .entry(rec.recommendation_type)
                .or_insert(0) += 1;
            total_cost += rec.estimated_cost_crore;
        }
    }

    AreaInsights {
        total_roads_analyzed: total,
        roads_needing_intervention: needing.len(),
        intervention_rate_pct: if total > 0 {
            needing.len() as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        priority_counts,
        intervention_type_counts,
        total_estimated_cost_crore: total_cost,
        area_metrics: area_metrics(analyses),
        hotspots: hotspots(analyses),
        recommended_phasing: phasing(&needing),
    }
}

fn area_metrics(analyses: &[RoadAnalysis]) -> AreaMetrics {
    if analyses.is_empty() {
        return AreaMetrics {
            average_frequency: 0.0,
            average_congestion: 0.0,
            peak_congestion_hour: None,
        };
    }

    let n = analyses.len() as f64;
    let average_frequency = analyses
        .iter()
        .map(|a| a.traffic_pattern.frequency_score)
        .sum::<f64>()
        / n;
    let average_congestion = analyses
        .iter()
        .map(|a| a.congestion_metrics.avg_congestion)
        .sum::<f64>()
        / n;

    // Most frequent peak hour across roads; BTreeMap iteration order
    // makes ties resolve to the lower hour.
    let mut hour_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for analysis in analyses {
        for &hour in &analysis.traffic_pattern.peak_hours {
            *hour_counts.entry(hour).or_insert(0) += 1;
        }
    }
    let mut peak_congestion_hour = None;
    let mut best = 0;
    for (&hour, &count) in &hour_counts {
        if count > best {
            best = count;
            peak_congestion_hour = Some(hour);
        }
    }

    AreaMetrics {
        average_frequency,
        average_congestion,
        peak_congestion_hour,
    }
}

/// Top roads by combined frequency+severity score, descending. Ties
/// resolve to the higher priority score, then lexical road id, so the
/// ranking never depends on insertion order.
fn hotspots(analyses: &[RoadAnalysis]) -> Vec<Hotspot> {
    let mut ranked: Vec<Hotspot> = analyses
        .iter()
        .map(|a| Hotspot {
            road_id: a.road_id.clone(),
            name: a.road.name.clone(),
            priority: a.priority,
            hotspot_score: hotspot_score(a),
            frequency_score: a.traffic_pattern.frequency_score,
            avg_congestion: a.congestion_metrics.avg_congestion,
            priority_score: a.priority_score,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.hotspot_score
            .partial_cmp(&a.hotspot_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.priority_score.cmp(&a.priority_score))
            .then(a.road_id.cmp(&b.road_id))
    });
    ranked.truncate(HOTSPOT_LIMIT);
    ranked
}

/// Group roads needing intervention into phases by priority tier.
/// Only non-empty phases are emitted; roads within a phase are ordered
/// by priority score descending, then road id.
fn phasing(needing: &[&RoadAnalysis]) -> Vec<InterventionPhase> {
    let plan = [
        (1, PriorityTier::Critical, "Immediate intervention"),
        (2, PriorityTier::High, "Near-term capacity works"),
        (3, PriorityTier::Medium, "Planned improvements"),
    ];

    let mut phases = Vec::new();
    for (number, tier, label) in plan {
        let mut members: Vec<&&RoadAnalysis> =
            needing.iter().filter(|a| a.priority == tier).collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| {
            b.priority_score
                .cmp(&a.priority_score)
                .then(a.road_id.cmp(&b.road_id))
        });

        let subtotal = members
            .iter()
            .flat_map(|a| &a.recommendations)
            .map(|r| r.estimated_cost_crore)
            .sum();

        phases.push(InterventionPhase {
            phase: number,
            label: label.to_string(),
            road_names: members.iter().map(|a| a.road.name.clone()).collect(),
            subtotal_cost_crore: subtotal,
        });
    }
    phases
}
