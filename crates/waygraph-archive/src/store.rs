//! Lazy map loading: archive extraction fronted by the blob cache.
//!
//! Parsing dominates the cost of bringing a map up, so parsed maps are kept
//! resident by the engine for its whole lifetime; the bounded cache here only
//! spares the archive from repeated extraction during bursts of cold-parse
//! activity on the same few maps.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use waygraph_core::{parse_map_record, MapData};

use crate::cache::BlobCache;
use crate::error::{ArchiveError, StoreError};
use crate::reader::ArchiveReader;

/// Archive reader plus blob cache: raw records on demand, parsed maps on
/// request.
pub struct MapStore {
    reader: ArchiveReader,
    cache: BlobCache,
}

impl MapStore {
    /// Open the archive at `path` with the given blob cache capacity.
    pub fn open(path: impl Into<PathBuf>, cache_capacity: usize) -> Result<Self, ArchiveError> {
        Ok(Self {
            reader: ArchiveReader::open(path)?,
            cache: BlobCache::new(cache_capacity),
        })
    }

    /// Path of the underlying archive.
    pub fn archive_path(&self) -> &Path {
        self.reader.path()
    }

    /// All map ids present in the archive, sorted ascending.
    pub fn available_ids(&self) -> &[i32] {
        self.reader.available_ids()
    }

    /// Whether the archive contains a record for `map_id`.
    pub fn has_map(&self, map_id: i32) -> bool {
        self.reader.has_map(map_id)
    }

    /// Raw record for `map_id`: cache hit, or archive extraction that
    /// populates the cache on the way out.
    pub fn load_blob(&self, map_id: i32) -> Result<Arc<[u8]>, ArchiveError> {
        if let Some(blob) = self.cache.get(map_id) {
            return Ok(blob);
        }
        let blob: Arc<[u8]> = self.reader.extract_map(map_id)?.into();
        self.cache.put(map_id, Arc::clone(&blob));
        Ok(blob)
    }

    /// Load and decode the record for `map_id`.
    ///
    /// The returned map is re-stamped with the requested id, so a record's
    /// `map_ids` aliases never leak into registry keys.
    pub fn load_map(&self, map_id: i32) -> Result<MapData, StoreError> {
        let blob = self.load_blob(map_id)?;
        let mut map =
            parse_map_record(map_id, &blob).map_err(|source| StoreError::Record { map_id, source })?;
        map.map_id = map_id;
        Ok(map)
    }

    /// Drop all cached blobs.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of blobs currently cached.
    pub fn cached_blob_count(&self) -> usize {
        self.cache.len()
    }
}
