//! Road registry trait: areas and static road metadata.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{AreaDataset, AreaId, RoadId, RoadMetadata};
use crate::db::models::AreaInfo;

/// Repository trait for area and road metadata operations.
#[async_trait]
pub trait RoadRegistry: Send + Sync {
    /// Store a complete area dataset (roads plus sample history).
    ///
    /// Re-uploading an area with an identical checksum is a no-op that
    /// returns the existing record; a different checksum replaces the
    /// stored dataset.
    ///
    /// # Returns
    /// * `Ok(AreaInfo)` - Listing entry for the stored area
    /// * `Err(RepositoryError)` - If the dataset fails validation
    async fn store_area_dataset(
        &self,
        dataset: &AreaDataset,
        checksum: &str,
    ) -> RepositoryResult<AreaInfo>;

    /// List all stored areas, ordered by area id.
    async fn list_areas(&self) -> RepositoryResult<Vec<AreaInfo>>;

    /// Fetch the listing entry for one area.
    async fn fetch_area(&self, area_id: &AreaId) -> RepositoryResult<AreaInfo>;

    /// Fetch all road metadata for an area, ordered by road id.
    async fn fetch_area_roads(&self, area_id: &AreaId) -> RepositoryResult<Vec<RoadMetadata>>;

    /// Fetch metadata for a single road.
    async fn fetch_road(&self, road_id: &RoadId) -> RepositoryResult<RoadMetadata>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
