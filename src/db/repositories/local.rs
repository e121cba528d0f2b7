//! In-memory repository implementation.
//!
//! Backs local development, the demo server, and the test suites.
//! All data lives behind a single `RwLock`; reads clone out so callers
//! never hold the lock across await points.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;

use crate::api::{AreaDataset, AreaId, RoadId, RoadMetadata, TrafficSample};
use crate::db::models::AreaInfo;
use crate::db::repository::{
    RepositoryError, RepositoryResult, RoadRegistry, SampleStore,
};

#[derive(Debug, Clone)]
struct StoredArea {
    name: String,
    checksum: String,
    roads: BTreeMap<RoadId, RoadMetadata>,
    samples: BTreeMap<RoadId, Vec<TrafficSample>>,
}

impl StoredArea {
    fn info(&self, area_id: &AreaId) -> AreaInfo {
        AreaInfo {
            area_id: area_id.clone(),
            name: self.name.clone(),
            road_count: self.roads.len(),
            sample_count: self.samples.values().map(Vec::len).sum(),
            checksum: self.checksum.clone(),
        }
    }
}

/// In-memory repository keyed by area id.
#[derive(Default)]
pub struct LocalRepository {
    areas: RwLock<BTreeMap<AreaId, StoredArea>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn validate_dataset(dataset: &AreaDataset) -> RepositoryResult<()> {
    if dataset.area_id.as_str().is_empty() {
        return Err(RepositoryError::validation("area_id must not be empty"));
    }
    if dataset.roads.is_empty() {
        return Err(RepositoryError::validation(format!(
            "area '{}' contains no roads",
            dataset.area_id
        )));
    }

    let mut road_ids = std::collections::HashSet::new();
    for road in &dataset.roads {
        if road.id.as_str().is_empty() {
            return Err(RepositoryError::validation("road id must not be empty"));
        }
        if road.area_id != dataset.area_id {
            return Err(RepositoryError::validation(format!(
                "road '{}' belongs to area '{}', not '{}'",
                road.id, road.area_id, dataset.area_id
            )));
        }
        if !road_ids.insert(&road.id) {
            return Err(RepositoryError::validation(format!(
                "duplicate road id '{}'",
                road.id
            )));
        }
    }

    for sample in &dataset.samples {
        if !road_ids.contains(&sample.road_id) {
            return Err(RepositoryError::validation(format!(
                "sample references unknown road '{}'",
                sample.road_id
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl RoadRegistry for LocalRepository {
    async fn store_area_dataset(
        &self,
        dataset: &AreaDataset,
        checksum: &str,
    ) -> RepositoryResult<AreaInfo> {
        validate_dataset(dataset)?;

        let mut areas = self.areas.write();

        if let Some(existing) = areas.get(&dataset.area_id) {
            if existing.checksum == checksum {
                debug!(
                    "area '{}' re-uploaded with identical checksum, keeping stored dataset",
                    dataset.area_id
                );
                return Ok(existing.info(&dataset.area_id));
            }
        }

        let roads: BTreeMap<RoadId, RoadMetadata> = dataset
            .roads
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();

        let mut samples: BTreeMap<RoadId, Vec<TrafficSample>> = BTreeMap::new();
        for sample in &dataset.samples {
            samples
                .entry(sample.road_id.clone())
                .or_default()
                .push(sample.clone());
        }
        for per_road in samples.values_mut() {
            per_road.sort_by_key(|s| s.timestamp);
        }

        let stored = StoredArea {
            name: dataset.name.clone(),
            checksum: checksum.to_string(),
            roads,
            samples,
        };
        let info = stored.info(&dataset.area_id);
        areas.insert(dataset.area_id.clone(), stored);

        debug!(
            "stored area '{}': {} roads, {} samples",
            info.area_id, info.road_count, info.sample_count
        );
        Ok(info)
    }

    async fn list_areas(&self) -> RepositoryResult<Vec<AreaInfo>> {
        let areas = self.areas.read();
        Ok(areas.iter().map(|(id, area)| area.info(id)).collect())
    }

    async fn fetch_area(&self, area_id: &AreaId) -> RepositoryResult<AreaInfo> {
        let areas = self.areas.read();
        areas
            .get(area_id)
            .map(|area| area.info(area_id))
            .ok_or_else(|| RepositoryError::not_found(format!("area '{}'", area_id)))
    }

    async fn fetch_area_roads(&self, area_id: &AreaId) -> RepositoryResult<Vec<RoadMetadata>> {
        let areas = self.areas.read();
        let area = areas
            .get(area_id)
            .ok_or_else(|| RepositoryError::not_found(format!("area '{}'", area_id)))?;
        Ok(area.roads.values().cloned().collect())
    }

    async fn fetch_road(&self, road_id: &RoadId) -> RepositoryResult<RoadMetadata> {
        let areas = self.areas.read();
        for area in areas.values() {
            if let Some(road) = area.roads.get(road_id) {
                return Ok(road.clone());
            }
        }
        Err(RepositoryError::not_found(format!("road '{}'", road_id)))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl SampleStore for LocalRepository {
    async fn fetch_samples(
        &self,
        road_id: &RoadId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TrafficSample>> {
        let areas = self.areas.read();
        for area in areas.values() {
            if let Some(samples) = area.samples.get(road_id) {
                return Ok(samples
                    .iter()
                    .filter(|s| s.timestamp >= from && s.timestamp < to)
                    .cloned()
                    .collect());
            }
        }
        // Unknown road: empty history, not an error.
        Ok(Vec::new())
    }
}
