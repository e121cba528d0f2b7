use chrono::{DateTime, Duration, TimeZone, Utc};

use roadsense::api::{
    AnalysisWindow, AreaDataset, AreaId, PriorityTier, RecommendationType, RoadId, RoadMetadata,
    RoadType, TrafficSample,
};
use roadsense::db::repositories::LocalRepository;
use roadsense::db::{calculate_checksum, RoadRegistry};
use roadsense::services::{analyze_area, analyze_road, frequency_report, score_tier};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

fn now_after(days: u32) -> DateTime<Utc> {
    base_time() + Duration::days(i64::from(days))
}

fn road(id: &str, area: &str, road_type: RoadType, length_km: f64, lanes: u32) -> RoadMetadata {
    RoadMetadata {
        id: RoadId::new(id),
        area_id: AreaId::new(area),
        name: format!("Road {}", id),
        road_type,
        length_km,
        lanes,
        intersections: None,
        geometry: vec![],
    }
}

/// One sample per day at the given congestion levels, one level per day.
fn daily_samples(road_id: &str, congestion_by_day: &[f64]) -> Vec<TrafficSample> {
    congestion_by_day
        .iter()
        .enumerate()
        .map(|(day, &congestion)| TrafficSample {
            road_id: RoadId::new(road_id),
            timestamp: base_time() + Duration::days(day as i64),
            speed_kmh: 60.0 * (1.0 - congestion),
            free_flow_kmh: 60.0,
            vehicle_count: None,
        })
        .collect()
}

async fn store(repo: &LocalRepository, dataset: &AreaDataset) {
    let canonical = serde_json::to_string(dataset).unwrap();
    let checksum = calculate_checksum(&canonical);
    repo.store_area_dataset(dataset, &checksum).await.unwrap();
}

#[tokio::test]
async fn test_scenario_constant_heavy_congestion() {
    // 30 days, every day at congestion 0.80.
    let repo = LocalRepository::new();
    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Scenario 1".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 5.0, 2)],
        samples: daily_samples("r1", &[0.80; 30]),
    };
    store(&repo, &dataset).await;

    let analysis = analyze_road(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    assert_eq!(analysis.traffic_pattern.frequency_score, 1.0);
    assert!(analysis.needs_intervention);
    assert_eq!(score_tier(analysis.priority_score), PriorityTier::Critical);

    let capacity_rec = analysis
        .recommendations
        .iter()
        .find(|r| {
            matches!(
                r.recommendation_type,
                RecommendationType::Widening | RecommendationType::Flyover
            )
        })
        .expect("expected a capacity recommendation");
    assert_eq!(capacity_rec.recommendation_type, RecommendationType::Widening);
    assert!((capacity_rec.estimated_cost_crore - 5.0 * 8.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_scenario_rare_congestion_is_monitor_only() {
    // 30 days, only 2 days above the high-traffic threshold.
    let mut congestion = [0.30; 30];
    congestion[14] = 0.80;
    congestion[15] = 0.80;

    let repo = LocalRepository::new();
    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Scenario 2".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 5.0, 2)],
        samples: daily_samples("r1", &congestion),
    };
    store(&repo, &dataset).await;

    let analysis = analyze_road(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    assert!((analysis.traffic_pattern.frequency_score - 2.0 / 30.0).abs() < 1e-9);
    assert_eq!(analysis.priority, PriorityTier::Monitor);
    assert!(!analysis.needs_intervention);
    assert!(analysis.recommendations.is_empty());
}

#[tokio::test]
async fn test_scenario_widening_cost_formula() {
    // 8 km primary road with 2 lanes, 24 of 30 days high-traffic,
    // average around 0.72, peak 0.92: rule 2 fires at HIGH and the
    // widening estimate must be exactly 8 x 8.5 = 68.0 crore.
    let mut congestion = [0.80; 30];
    for low_day in [0, 5, 10, 15, 20, 25] {
        congestion[low_day] = 0.36;
    }
    congestion[7] = 0.92;

    let repo = LocalRepository::new();
    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Scenario 3".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 8.0, 2)],
        samples: daily_samples("r1", &congestion),
    };
    store(&repo, &dataset).await;

    let analysis = analyze_road(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    assert!((analysis.traffic_pattern.frequency_score - 0.80).abs() < 1e-9);
    assert_eq!(analysis.priority, PriorityTier::High);
    assert_eq!(
        analysis.intervention_reason,
        "regular severe congestion; plan widening"
    );
    assert!((analysis.congestion_metrics.max_congestion - 0.92).abs() < 1e-9);

    let widening = analysis
        .recommendations
        .iter()
        .find(|r| r.recommendation_type == RecommendationType::Widening)
        .expect("expected a widening recommendation");
    assert!((widening.estimated_cost_crore - 68.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_scenario_no_samples_is_monitor() {
    let repo = LocalRepository::new();
    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Scenario 4".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 5.0, 2)],
        samples: vec![],
    };
    store(&repo, &dataset).await;

    let analysis = analyze_road(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    assert_eq!(analysis.priority, PriorityTier::Monitor);
    assert_eq!(analysis.traffic_pattern.frequency_score, 0.0);
    assert!(analysis.recommendations.is_empty());
}

#[tokio::test]
async fn test_area_hotspots_rank_by_frequency_and_severity() {
    let repo = LocalRepository::new();
    let mut samples = daily_samples("hot", &[0.90; 30]);
    samples.extend(daily_samples("mid", &{
        let mut mid = [0.50; 30];
        // Push about half the days over the threshold.
        for day in (0..30).step_by(2) {
            mid[day] = 0.72;
        }
        mid
    }));
    samples.extend(daily_samples("calm", &[0.10; 30]));

    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Hotspots".to_string(),
        roads: vec![
            road("hot", "a1", RoadType::Primary, 4.0, 2),
            road("mid", "a1", RoadType::Secondary, 3.0, 2),
            road("calm", "a1", RoadType::Residential, 2.0, 2),
        ],
        samples,
    };
    store(&repo, &dataset).await;

    let area = analyze_area(&repo, &AreaId::new("a1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    let hotspot_ids: Vec<&str> = area
        .insights
        .hotspots
        .iter()
        .map(|h| h.road_id.as_str())
        .collect();
    assert_eq!(hotspot_ids, vec!["hot", "mid", "calm"]);

    // Intervention invariant holds across the whole pipeline.
    for analysis in &area.roads {
        assert_eq!(
            analysis.needs_intervention,
            !analysis.recommendations.is_empty(),
            "invariant violated for road {}",
            analysis.road_id
        );
    }
}

#[tokio::test]
async fn test_area_analysis_is_deterministic() {
    let repo = LocalRepository::new();
    let mut samples = daily_samples("r1", &[0.85; 30]);
    samples.extend(daily_samples("r2", &[0.40; 30]));

    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Determinism".to_string(),
        roads: vec![
            road("r1", "a1", RoadType::Primary, 5.0, 2),
            road("r2", "a1", RoadType::Secondary, 3.0, 2),
        ],
        samples,
    };
    store(&repo, &dataset).await;

    let now = now_after(30);
    let first = analyze_area(&repo, &AreaId::new("a1"), AnalysisWindow::Month, now)
        .await
        .unwrap();
    let second = analyze_area(&repo, &AreaId::new("a1"), AnalysisWindow::Month, now)
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_area_batch_survives_degraded_road() {
    // One road with unusable metadata still classifies, carries a
    // warning, and does not prevent the rest of the area from analyzing.
    let repo = LocalRepository::new();
    let mut samples = daily_samples("good", &[0.85; 30]);
    samples.extend(daily_samples("broken", &[0.85; 30]));

    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Degraded".to_string(),
        roads: vec![
            road("good", "a1", RoadType::Primary, 5.0, 2),
            road("broken", "a1", RoadType::Primary, 0.0, 2),
        ],
        samples,
    };
    store(&repo, &dataset).await;

    let area = analyze_area(&repo, &AreaId::new("a1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();
    assert_eq!(area.roads.len(), 2);

    let broken = area
        .roads
        .iter()
        .find(|a| a.road_id.as_str() == "broken")
        .unwrap();
    assert!(broken.needs_intervention);
    assert!(broken.recommendations.is_empty());
    assert_eq!(broken.warnings.len(), 1);

    let good = area.roads.iter().find(|a| a.road_id.as_str() == "good").unwrap();
    assert!(!good.recommendations.is_empty());
    assert!(good.warnings.is_empty());
}

#[tokio::test]
async fn test_frequency_report_decision() {
    let repo = LocalRepository::new();
    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Frequency".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 5.0, 2)],
        samples: daily_samples("r1", &[0.80; 30]),
    };
    store(&repo, &dataset).await;

    let report = frequency_report(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();

    assert_eq!(report.decision, "NEEDS_INTERVENTION");
    assert_eq!(report.observed_days, 30);
    assert_eq!(report.high_traffic_day_count, 30);
    assert!((report.frequency_pct - 100.0).abs() < 1e-9);
    assert!(report.reason.contains("30 of 30 observed days"));
}

#[tokio::test]
async fn test_window_excludes_old_samples() {
    // Heavy congestion that ended two months ago must not influence a
    // 30-day analysis.
    let repo = LocalRepository::new();
    let old: Vec<TrafficSample> = (0..30)
        .map(|day| TrafficSample {
            road_id: RoadId::new("r1"),
            timestamp: base_time() - Duration::days(60) + Duration::days(day),
            speed_kmh: 6.0,
            free_flow_kmh: 60.0,
            vehicle_count: None,
        })
        .collect();
    let mut samples = daily_samples("r1", &[0.20; 30]);
    samples.extend(old);

    let dataset = AreaDataset {
        area_id: AreaId::new("a1"),
        name: "Window".to_string(),
        roads: vec![road("r1", "a1", RoadType::Primary, 5.0, 2)],
        samples,
    };
    store(&repo, &dataset).await;

    let analysis = analyze_road(&repo, &RoadId::new("r1"), AnalysisWindow::Month, now_after(30))
        .await
        .unwrap();
    assert_eq!(analysis.priority, PriorityTier::Monitor);
    assert_eq!(analysis.traffic_pattern.observed_days, 30);
}
