//! Traffic sample store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{RoadId, TrafficSample};

/// Repository trait for timestamped traffic samples.
///
/// In production this fronts whatever telemetry system supplies speed
/// observations; the analysis core only needs this query contract.
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Fetch samples for a road within `[from, to)`, ordered by
    /// timestamp ascending.
    ///
    /// An unknown road yields an empty vector, not an error: absence of
    /// telemetry is a valid state and must never abort a batch analysis.
    async fn fetch_samples(
        &self,
        road_id: &RoadId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TrafficSample>>;
}
