//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Area datasets
        .route("/areas", get(handlers::list_areas))
        .route("/areas", post(handlers::upload_area))
        .route("/areas/{area_id}/roads", get(handlers::get_area_roads))
        // Analysis endpoints
        .route("/areas/{area_id}/analysis", get(handlers::get_area_analysis))
        .route("/roads/{road_id}/analysis", get(handlers::get_road_analysis))
        .route("/roads/{road_id}/frequency", get(handlers::get_road_frequency));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Allow large sample histories during dataset uploads.
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
