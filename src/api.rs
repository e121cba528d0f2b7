//! Public API surface for the road analysis backend.
//!
//! This file consolidates the data-model types shared by the repository
//! layer, the analysis services, and the HTTP API. All types derive
//! Serialize/Deserialize; the snake_case field names are the stable JSON
//! contract a dashboard frontend renders against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Road segment identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadId(pub String);

/// Analysis area identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub String);

impl RoadId {
    pub fn new(value: impl Into<String>) -> Self {
        RoadId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AreaId {
    pub fn new(value: impl Into<String>) -> Self {
        AreaId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic point (latitude, longitude) in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Road classification, following the highway tagging hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    Highway,
    Primary,
    Secondary,
    Tertiary,
    Residential,
}

/// Static attributes of a road segment.
///
/// Owned by the road registry; read-only to the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadMetadata {
    pub id: RoadId,
    pub area_id: AreaId,
    pub name: String,
    pub road_type: RoadType,
    /// Segment length in kilometres. Required for cost estimation.
    pub length_km: f64,
    pub lanes: u32,
    /// Signalized intersection count along the segment, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersections: Option<u32>,
    /// Ordered polyline of the segment.
    #[serde(default)]
    pub geometry: Vec<LatLng>,
}

/// One timestamped speed observation for a road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub road_id: RoadId,
    pub timestamp: DateTime<Utc>,
    pub speed_kmh: f64,
    pub free_flow_kmh: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_count: Option<u32>,
}

impl TrafficSample {
    /// Normalized [0, 1] congestion: degradation of travel speed relative
    /// to free-flow speed. A non-positive free-flow speed yields 0.
    pub fn congestion(&self) -> f64 {
        if self.free_flow_kmh <= 0.0 {
            return 0.0;
        }
        (1.0 - self.speed_kmh / self.free_flow_kmh).clamp(0.0, 1.0)
    }
}

/// Supported analysis lookback windows.
///
/// The window length changes the denominator semantics of frequency
/// scoring, so anything outside this set is rejected at the boundary
/// instead of silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisWindow {
    Week,
    Month,
    Quarter,
    Year,
}

impl AnalysisWindow {
    pub const fn days(self) -> u32 {
        match self {
            AnalysisWindow::Week => 7,
            AnalysisWindow::Month => 30,
            AnalysisWindow::Quarter => 90,
            AnalysisWindow::Year => 365,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(AnalysisWindow::Week),
            30 => Some(AnalysisWindow::Month),
            90 => Some(AnalysisWindow::Quarter),
            365 => Some(AnalysisWindow::Year),
            _ => None,
        }
    }
}

/// Congestion trend over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Average congestion for one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayCongestion {
    /// Lowercase day name ("monday".."sunday").
    pub day: String,
    pub avg_congestion: f64,
}

/// Derived traffic pattern for one road over one analysis window.
///
/// Computed fresh on every analysis call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPattern {
    /// Fraction of observed days classified high-traffic, in [0, 1].
    /// The denominator is the number of days actually present in the
    /// data, not the requested window length, so sparse windows are not
    /// penalized.
    pub frequency_score: f64,
    pub high_traffic_day_count: u32,
    /// Distinct calendar days with at least one sample.
    pub observed_days: u32,
    /// Up to three hours of day with the worst average congestion,
    /// worst first.
    pub peak_hours: Vec<u32>,
    pub trend: Trend,
    /// Average congestion per day of week, Monday..Sunday, only days
    /// with data.
    pub weekly_average: Vec<WeekdayCongestion>,
}

/// Congestion severity metrics over the whole window, all in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionMetrics {
    pub avg_congestion: f64,
    pub max_congestion: f64,
    /// Alias of `max_congestion`, kept for wire compatibility with
    /// existing dashboards.
    pub peak_congestion: f64,
}

/// Intervention priority tier, the rule-matrix output driving decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
    Monitor,
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PriorityTier::Critical => "critical",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
            PriorityTier::Monitor => "monitor",
        };
        write!(f, "{}", s)
    }
}

/// Severity of an identified problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemSeverity {
    Critical,
    High,
    Medium,
}

/// A problem identified on a road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub problem_type: String,
    pub severity: ProblemSeverity,
    pub description: String,
    pub impact: String,
}

/// Intervention types the recommendation engine can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Widening,
    Flyover,
    Bridge,
    Maintenance,
    Signals,
    Planning,
}

/// Urgency of one recommendation, independent of the road's overall tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

/// Inclusive month range for an implementation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthsRange {
    pub min_months: u32,
    pub max_months: u32,
}

impl MonthsRange {
    pub const fn new(min_months: u32, max_months: u32) -> Self {
        Self {
            min_months,
            max_months,
        }
    }
}

/// One proposed intervention for a road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation_type: RecommendationType,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    /// Cites the metric that triggered the proposal.
    pub reason: String,
    /// Estimated cost in crore (10,000,000 INR).
    pub estimated_cost_crore: f64,
    pub timeline_months: MonthsRange,
    pub expected_impact: String,
    #[serde(default)]
    pub implementation_phases: Vec<String>,
}

/// Complete analysis result for one road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadAnalysis {
    pub road_id: RoadId,
    pub road: RoadMetadata,
    pub traffic_pattern: TrafficPattern,
    pub congestion_metrics: CongestionMetrics,
    pub needs_intervention: bool,
    pub intervention_reason: String,
    /// Rule-matrix priority tier.
    pub priority: PriorityTier,
    /// Weighted 0-100 score. Independent confirmation signal; may
    /// diverge from the rule-based tier.
    pub priority_score: u8,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Degraded-data notes (metadata gaps, sample fetch failures).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Area-wide averages across all analyzed roads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMetrics {
    pub average_frequency: f64,
    pub average_congestion: f64,
    /// Most frequent peak hour across roads; ties resolve to the lower
    /// hour. None when no road has any peak hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_congestion_hour: Option<u32>,
}

/// One entry of the area hotspot ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub road_id: RoadId,
    pub name: String,
    pub priority: PriorityTier,
    /// Combined frequency+severity ranking score.
    pub hotspot_score: f64,
    pub frequency_score: f64,
    pub avg_congestion: f64,
    pub priority_score: u8,
}

/// One phase of the recommended area intervention plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionPhase {
    pub phase: u32,
    pub label: String,
    pub road_names: Vec<String>,
    pub subtotal_cost_crore: f64,
}

/// Aggregate insights over a set of road analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaInsights {
    pub total_roads_analyzed: usize,
    pub roads_needing_intervention: usize,
    pub intervention_rate_pct: f64,
    pub priority_counts: std::collections::BTreeMap<PriorityTier, usize>,
    pub intervention_type_counts: std::collections::BTreeMap<RecommendationType, usize>,
    pub total_estimated_cost_crore: f64,
    pub area_metrics: AreaMetrics,
    pub hotspots: Vec<Hotspot>,
    pub recommended_phasing: Vec<InterventionPhase>,
}

/// Full area analysis payload: per-road results plus aggregate insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaAnalysis {
    pub area_id: AreaId,
    pub window_days: u32,
    pub roads: Vec<RoadAnalysis>,
    pub insights: AreaInsights,
}

/// Upload payload: a named area with its road network and sample history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDataset {
    pub area_id: AreaId,
    pub name: String,
    pub roads: Vec<RoadMetadata>,
    #[serde(default)]
    pub samples: Vec<TrafficSample>,
}

/// Lightweight frequency decision summary for a single road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub road_id: RoadId,
    pub window_days: u32,
    pub observed_days: u32,
    pub high_traffic_day_count: u32,
    pub frequency_pct: f64,
    pub avg_congestion_pct: f64,
    /// "NEEDS_INTERVENTION" or "MONITOR_ONLY".
    pub decision: String,
    pub reason: String,
    pub recommended_action: String,
}
