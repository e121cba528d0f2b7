//! # Roadsense Backend
//!
//! Frequency-based infrastructure-stress decision engine.
//!
//! This crate analyzes historical congestion samples per road segment,
//! derives a frequency score and severity profile, and deterministically
//! classifies each road into an intervention-priority tier with concrete
//! recommendations and cost estimates. Per-road results roll up into
//! area-wide insights (hotspots, total cost, phased intervention plan).
//! The backend exposes a REST API via Axum for dashboard frontends.
//!
//! ## Features
//!
//! - **Pattern Analysis**: daily congestion grouping, peak hours, trend
//! - **Classification**: rule-matrix intervention decisions with priority tiers
//! - **Recommendations**: intervention proposals with cost and timeline estimates
//! - **Scoring**: continuous 0-100 priority score for ranking and hotspots
//! - **Aggregation**: area-level insights across all analyzed roads
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: data model and DTOs for analysis results
//! - [`db`]: repository pattern over road metadata and traffic samples
//! - [`services`]: the analysis pipeline (pure computation + orchestration)
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`config`]: server configuration from TOML and environment
//!
//! ## Determinism
//!
//! The analysis core is pure computation over in-memory data: given the
//! same samples, window, and caller-supplied "now", repeated calls produce
//! identical output. The only I/O happens at the repository boundary.

pub mod api;

pub mod config;
pub mod db;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
