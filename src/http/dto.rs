//! Data Transfer Objects for the HTTP API.
//!
//! The analysis payloads are re-exported from the api module since they
//! already derive Serialize/Deserialize; this file adds the thin
//! request/response wrappers specific to the REST surface.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    AreaAnalysis, AreaDataset, AreaId, AreaInsights, AreaMetrics, CongestionMetrics,
    FrequencyReport, Hotspot, InterventionPhase, MonthsRange, PriorityTier, Problem,
    Recommendation, RecommendationPriority, RecommendationType, RoadAnalysis, RoadId,
    RoadMetadata, TrafficPattern, TrafficSample, Trend,
};
pub use crate::db::models::AreaInfo;

/// Query parameters for analysis endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzeQuery {
    /// Lookback window in days (7, 30, 90 or 365; default 30)
    #[serde(default)]
    pub window_days: Option<u32>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub repository: String,
}

/// Area list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaListResponse {
    /// List of stored areas
    pub areas: Vec<AreaInfo>,
    /// Total count
    pub total: usize,
}

/// Road metadata listing for one area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaRoadsResponse {
    pub area_id: AreaId,
    pub roads: Vec<RoadMetadata>,
    pub total: usize,
}

/// Response for a dataset upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAreaResponse {
    pub area_id: AreaId,
    pub name: String,
    /// Number of roads stored
    pub roads: usize,
    /// Number of samples stored
    pub samples: usize,
    /// SHA-256 of the uploaded dataset JSON
    pub checksum: String,
}
