//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. All analysis endpoints are
//! read-only and idempotent for fixed stored data.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{
    AnalyzeQuery, AreaListResponse, AreaRoadsResponse, HealthResponse, UploadAreaResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AnalysisWindow, AreaAnalysis, AreaDataset, AreaId, FrequencyReport, RoadAnalysis, RoadId};
use crate::db::calculate_checksum;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Default lookback window when the query omits `window_days`.
const DEFAULT_WINDOW_DAYS: u32 = 30;

fn parse_window(query: &AnalyzeQuery) -> Result<AnalysisWindow, AppError> {
    let days = query.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
    AnalysisWindow::from_days(days)
        .ok_or_else(|| AppError::from(services::AnalysisError::UnknownWindow { days }))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
    }))
}

// =============================================================================
// Area Datasets
// =============================================================================

/// GET /v1/areas
///
/// List all stored areas.
pub async fn list_areas(State(state): State<AppState>) -> HandlerResult<AreaListResponse> {
    let areas = state.repository.list_areas().await?;
    let total = areas.len();
    Ok(Json(AreaListResponse { areas, total }))
}

/// POST /v1/areas
///
/// Upload an area dataset (road network plus sample history).
pub async fn upload_area(
    State(state): State<AppState>,
    Json(dataset): Json<AreaDataset>,
) -> Result<(StatusCode, Json<UploadAreaResponse>), AppError> {
    let canonical = serde_json::to_string(&dataset)
        .map_err(|e| AppError::BadRequest(format!("invalid dataset JSON: {}", e)))?;
    let checksum = calculate_checksum(&canonical);

    let info = state
        .repository
        .store_area_dataset(&dataset, &checksum)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadAreaResponse {
            area_id: info.area_id,
            name: info.name,
            roads: info.road_count,
            samples: info.sample_count,
            checksum: info.checksum,
        }),
    ))
}

/// GET /v1/areas/{area_id}/roads
///
/// List road metadata for one area.
pub async fn get_area_roads(
    State(state): State<AppState>,
    Path(area_id): Path<String>,
) -> HandlerResult<AreaRoadsResponse> {
    let area_id = AreaId::new(area_id);
    let roads = state.repository.fetch_area_roads(&area_id).await?;
    let total = roads.len();
    Ok(Json(AreaRoadsResponse {
        area_id,
        roads,
        total,
    }))
}

// =============================================================================
// Analysis Endpoints
// =============================================================================

/// GET /v1/areas/{area_id}/analysis?window_days=30
///
/// Analyze every road of an area and aggregate the results.
pub async fn get_area_analysis(
    State(state): State<AppState>,
    Path(area_id): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> HandlerResult<AreaAnalysis> {
    let window = parse_window(&query)?;
    let area_id = AreaId::new(area_id);

    let data =
        services::analyze_area(state.repository.as_ref(), &area_id, window, Utc::now()).await?;
    Ok(Json(data))
}

/// GET /v1/roads/{road_id}/analysis?window_days=30
///
/// Analyze a single road segment.
pub async fn get_road_analysis(
    State(state): State<AppState>,
    Path(road_id): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> HandlerResult<RoadAnalysis> {
    let window = parse_window(&query)?;
    let road_id = RoadId::new(road_id);

    let data =
        services::analyze_road(state.repository.as_ref(), &road_id, window, Utc::now()).await?;
    Ok(Json(data))
}

/// GET /v1/roads/{road_id}/frequency?window_days=30
///
/// Frequency decision summary for a single road.
pub async fn get_road_frequency(
    State(state): State<AppState>,
    Path(road_id): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> HandlerResult<FrequencyReport> {
    let window = parse_window(&query)?;
    let road_id = RoadId::new(road_id);

    let data =
        services::frequency_report(state.repository.as_ref(), &road_id, window, Utc::now())
            .await?;
    Ok(Json(data))
}
