//! Shared data models re-exported for storage layer consumers.

pub use crate::api::{AreaDataset, AreaId, RoadId, RoadMetadata, TrafficSample};

/// Lightweight area listing entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AreaInfo {
    pub area_id: AreaId,
    pub name: String,
    pub road_count: usize,
    pub sample_count: usize,
    /// SHA-256 of the uploaded dataset JSON.
    pub checksum: String,
}
