//! Analysis orchestration.
//!
//! Wires the pure pipeline (pattern -> classifier/scorer ->
//! recommendations) to the repository boundary, per road and per area.
//! Per-road failures never abort an area batch: a road whose samples
//! cannot be fetched degrades to a monitor-tier result with a warning
//! attached, and the rest of the area still aggregates.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::warn;

use crate::api::{
    AnalysisWindow, AreaAnalysis, AreaId, FrequencyReport, RoadAnalysis, RoadId, RoadMetadata,
    TrafficSample,
};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::services::aggregate::aggregate_area;
use crate::services::classifier::{classify, identify_problems};
use crate::services::pattern::analyze_pattern;
use crate::services::recommendation::generate_recommendations;
use crate::services::scoring::priority_score;

/// Bound on concurrent sample fetches during area analysis, so the
/// sample store's own rate limits are respected.
const SAMPLE_FETCH_CONCURRENCY: usize = 8;

/// Errors surfaced by the analysis entry points.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The lookback window changes frequency-score semantics, so
    /// unsupported values are rejected at the boundary instead of
    /// silently defaulted.
    #[error("unsupported analysis window: {days} days (expected 7, 30, 90 or 365)")]
    UnknownWindow { days: u32 },

    #[error("unknown area: {0}")]
    UnknownArea(AreaId),

    #[error("unknown road: {0}")]
    RoadNotFound(RoadId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn window_start(now: DateTime<Utc>, window: AnalysisWindow) -> DateTime<Utc> {
    now - chrono::Duration::days(i64::from(window.days()))
}

/// Check that a road carries the metadata cost estimation needs.
fn validate_for_costing(road: &RoadMetadata) -> Result<(), String> {
    if !(road.length_km > 0.0) || !road.length_km.is_finite() {
        return Err(format!(
            "road '{}' has no usable length_km; recommendations skipped",
            road.id
        ));
    }
    if road.lanes == 0 {
        return Err(format!(
            "road '{}' has no lane count; recommendations skipped",
            road.id
        ));
    }
    Ok(())
}

/// Run the pure analysis pipeline for one road.
///
/// Invalid metadata degrades the result (classification and scoring
/// proceed, recommendation generation is skipped with a warning) rather
/// than failing.
pub fn build_road_analysis(
    road: RoadMetadata,
    samples: &[TrafficSample],
    window: AnalysisWindow,
) -> RoadAnalysis {
    let (pattern, metrics) = analyze_pattern(samples, window);
    let classification = classify(&pattern, &metrics);
    let score = priority_score(&pattern, &metrics);
    let problems = identify_problems(&pattern, &metrics, classification.needs_intervention);

    let mut warnings = Vec::new();
    let recommendations = if classification.needs_intervention {
        match validate_for_costing(&road) {
            Ok(()) => {
                generate_recommendations(&road, &pattern, &metrics, classification.priority)
            }
            Err(warning) => {
                warn!("{}", warning);
                warnings.push(warning);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    RoadAnalysis {
        road_id: road.id.clone(),
        road,
        traffic_pattern: pattern,
        congestion_metrics: metrics,
        needs_intervention: classification.needs_intervention,
        intervention_reason: classification.reason,
        priority: classification.priority,
        priority_score: score,
        problems,
        recommendations,
        warnings,
    }
}

/// Analyze a single road over the given window, with `now` supplied by
/// the caller so repeated calls on fixed data are bit-identical.
pub async fn analyze_road(
    repo: &dyn FullRepository,
    road_id: &RoadId,
    window: AnalysisWindow,
    now: DateTime<Utc>,
) -> Result<RoadAnalysis, AnalysisError> {
    let road = repo.fetch_road(road_id).await.map_err(|e| {
        if e.is_not_found() {
            AnalysisError::RoadNotFound(road_id.clone())
        } else {
            AnalysisError::Repository(e)
        }
    })?;

    let samples = repo
        .fetch_samples(road_id, window_start(now, window), now)
        .await?;
    Ok(build_road_analysis(road, &samples, window))
}

/// Analyze every road of an area and aggregate the results.
///
/// Sample fetches run concurrently (bounded); the per-road pipeline is
/// CPU-bound and independent, and the final aggregation is a single
/// reduction. Results are ordered by road id regardless of fetch
/// completion order.
pub async fn analyze_area(
    repo: &dyn FullRepository,
    area_id: &AreaId,
    window: AnalysisWindow,
    now: DateTime<Utc>,
) -> Result<AreaAnalysis, AnalysisError> {
    let roads = repo.fetch_area_roads(area_id).await.map_err(|e| {
        if e.is_not_found() {
            AnalysisError::UnknownArea(area_id.clone())
        } else {
            AnalysisError::Repository(e)
        }
    })?;
    if roads.is_empty() {
        return Err(AnalysisError::UnknownArea(area_id.clone()));
    }

    let from = window_start(now, window);
    let mut analyses: Vec<RoadAnalysis> = stream::iter(roads)
        .map(|road| async move {
            match repo.fetch_samples(&road.id, from, now).await {
                Ok(samples) => build_road_analysis(road, &samples, window),
                Err(e) => {
                    warn!("sample fetch failed for road '{}': {}", road.id, e);
                    let mut degraded = build_road_analysis(road, &[], window);
                    degraded.warnings.push(format!("sample fetch failed: {}", e));
                    degraded
                }
            }
        })
        .buffer_unordered(SAMPLE_FETCH_CONCURRENCY)
        .collect()
        .await;

    analyses.sort_by(|a, b| a.road_id.cmp(&b.road_id));
    let insights = aggregate_area(&analyses);

    Ok(AreaAnalysis {
        area_id: area_id.clone(),
        window_days: window.days(),
        roads: analyses,
        insights,
    })
}

/// Lightweight frequency decision summary for one road.
pub async fn frequency_report(
    repo: &dyn FullRepository,
    road_id: &RoadId,
    window: AnalysisWindow,
    now: DateTime<Utc>,
) -> Result<FrequencyReport, AnalysisError> {
    let analysis = analyze_road(repo, road_id, window, now).await?;
    let pattern = &analysis.traffic_pattern;

    let (decision, recommended_action) = if analysis.needs_intervention {
        (
            "NEEDS_INTERVENTION",
            "Evaluate for infrastructure improvement",
        )
    } else {
        (
            "MONITOR_ONLY",
            "Continue monitoring, no immediate action required",
        )
    };

    Ok(FrequencyReport {
        road_id: road_id.clone(),
        window_days: window.days(),
        observed_days: pattern.observed_days,
        high_traffic_day_count: pattern.high_traffic_day_count,
        frequency_pct: pattern.frequency_score * 100.0,
        avg_congestion_pct: analysis.congestion_metrics.avg_congestion * 100.0,
        decision: decision.to_string(),
        reason: format!(
            "High congestion on {} of {} observed days; {}",
            pattern.high_traffic_day_count, pattern.observed_days, analysis.intervention_reason
        ),
        recommended_action: recommended_action.to_string(),
    })
}
