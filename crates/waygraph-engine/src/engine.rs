//! The engine handle: lazy map residency plus query serving.
//!
//! Parsed maps are immutable once published into the registry, so concurrent
//! queries share them through `Arc` without per-query locking; the `RwLock`
//! only guards the registry itself (many readers, exclusive insertion on
//! first parse).

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use waygraph_archive::{ArchiveError, MapStore, StoreError};
use waygraph_core::{parse_map_record, MapData, MapStatistics, ObstacleZone, Vec2};
use waygraph_search::{find_path, FoundPath, SearchOptions};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// A pathfinding engine over one map archive.
///
/// Thread-safe: any number of threads may issue queries concurrently. Every
/// query runs to completion on the calling thread.
pub struct PathEngine {
    config: EngineConfig,
    store: MapStore,
    maps: RwLock<HashMap<i32, Arc<MapData>>>,
}

impl PathEngine {
    /// Open the archive named by `config` and scan its contents.
    ///
    /// Maps are *not* parsed here; each is brought up on first use and stays
    /// resident for the engine's lifetime.
    pub fn open(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = MapStore::open(&config.archive_path, config.blob_cache_capacity)?;
        Ok(Self {
            config,
            store,
            maps: RwLock::new(HashMap::new()),
        })
    }

    /// The configuration this engine was opened with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the archive carries a record for `map_id`.
    pub fn has_map(&self, map_id: i32) -> bool {
        self.store.has_map(map_id)
    }

    /// All map ids present in the archive, sorted ascending.
    pub fn available_map_ids(&self) -> &[i32] {
        self.store.available_ids()
    }

    /// The resident parsed map for `map_id`, loading and parsing on demand.
    pub fn map(&self, map_id: i32) -> Result<Arc<MapData>, EngineError> {
        if let Some(map) = self.maps.read().unwrap().get(&map_id) {
            return Ok(Arc::clone(map));
        }

        let map = self.store.load_map(map_id).map_err(|e| match e {
            StoreError::Archive(ArchiveError::MapNotFound { .. }) => {
                EngineError::MapUnavailable { map_id }
            }
            StoreError::Archive(other) => EngineError::Archive(other),
            StoreError::Record { map_id, source } => EngineError::MapRejected { map_id, source },
        })?;

        // Two threads may race to the first parse; whichever published first
        // wins and the duplicate is dropped.
        let mut maps = self.maps.write().unwrap();
        let resident = maps.entry(map_id).or_insert_with(|| Arc::new(map));
        Ok(Arc::clone(resident))
    }

    /// Find a path on `map_id` from `start` to `goal`.
    ///
    /// `range > 0` decimates the returned waypoints to that minimum spacing.
    pub fn find_path(
        &self,
        map_id: i32,
        start: Vec2,
        goal: Vec2,
        range: f32,
    ) -> Result<FoundPath, EngineError> {
        self.find_path_with_obstacles(map_id, start, goal, &[], range)
    }

    /// [`find_path`](Self::find_path) with circular no-go zones applied to
    /// anchor selection and relaxation.
    pub fn find_path_with_obstacles(
        &self,
        map_id: i32,
        start: Vec2,
        goal: Vec2,
        obstacles: &[ObstacleZone],
        range: f32,
    ) -> Result<FoundPath, EngineError> {
        let map = self.map(map_id)?;
        let options = SearchOptions {
            teleporter_shortcuts: self.config.teleporter_heuristic,
            min_spacing: if range > 0.0 { range } else { 0.0 },
        };
        Ok(find_path(&map, start, goal, obstacles, &options)?)
    }

    /// Statistics for `map_id`, loading the map on demand.
    pub fn map_statistics(&self, map_id: i32) -> Result<MapStatistics, EngineError> {
        Ok(self.map(map_id)?.stats)
    }

    /// Load a map record from an external file, bypassing the archive.
    ///
    /// The parsed map is registered under `map_id`, replacing any resident
    /// map with that id.
    pub fn load_map_from_file(
        &self,
        map_id: i32,
        path: impl AsRef<Path>,
    ) -> Result<(), EngineError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut map = parse_map_record(map_id, &bytes)
            .map_err(|source| EngineError::MapRejected { map_id, source })?;
        map.map_id = map_id;
        self.maps.write().unwrap().insert(map_id, Arc::new(map));
        Ok(())
    }

    /// Ids of maps currently parsed and resident.
    pub fn resident_map_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.maps.read().unwrap().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop all cached raw blobs. Parsed maps stay resident.
    pub fn clear_blob_cache(&self) {
        self.store.clear_cache();
    }
}

impl std::fmt::Debug for PathEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathEngine")
            .field("archive_path", &self.config.archive_path)
            .field("available_maps", &self.store.available_ids().len())
            .field("resident_maps", &self.maps.read().unwrap().len())
            .finish()
    }
}
