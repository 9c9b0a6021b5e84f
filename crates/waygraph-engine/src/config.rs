//! Engine configuration and validation.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use waygraph_archive::BlobCache;

/// Complete configuration for constructing a [`PathEngine`](crate::PathEngine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path of the read-only map archive.
    pub archive_path: PathBuf,
    /// Capacity of the raw-blob LRU cache. Default: 20.
    pub blob_cache_capacity: usize,
    /// Whether the A* heuristic may route through teleporters. Disable for
    /// provably optimal paths. Default: true.
    pub teleporter_heuristic: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
            blob_cache_capacity: BlobCache::DEFAULT_CAPACITY,
            teleporter_heuristic: true,
        }
    }
}

impl EngineConfig {
    /// Configuration for the archive at `path`, defaults elsewhere.
    pub fn with_archive(path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: path.into(),
            ..Self::default()
        }
    }

    /// Validate structural invariants before the engine opens the archive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.archive_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyArchivePath);
        }
        if self.blob_cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }
}

/// The conventional archive location: `maps.zip` next to the running
/// executable, falling back to the working directory.
pub fn default_archive_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("maps.zip")))
        .unwrap_or_else(|| PathBuf::from("maps.zip"))
}

/// Errors detected during [`EngineConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The archive path is empty.
    EmptyArchivePath,
    /// The blob cache capacity is zero.
    ZeroCacheCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArchivePath => write!(f, "archive path is empty"),
            Self::ZeroCacheCapacity => write!(f, "blob cache capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
