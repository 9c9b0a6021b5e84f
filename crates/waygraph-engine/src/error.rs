//! Engine-level error taxonomy.
//!
//! Mirrors the host-facing failure table: archive problems surface at
//! initialisation, per-map problems name the offending id, and search
//! failures stay distinct so the boundary can map them to "no path found".

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use waygraph_archive::ArchiveError;
use waygraph_core::RecordError;
use waygraph_search::SearchError;

use crate::config::ConfigError;

/// Errors from engine construction and query serving.
#[derive(Debug)]
pub enum EngineError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The archive could not be opened or read.
    Archive(ArchiveError),
    /// The requested map has no record in the archive.
    MapUnavailable {
        /// The requested map id.
        map_id: i32,
    },
    /// The map's record was extracted but rejected by the parser.
    MapRejected {
        /// The requested map id.
        map_id: i32,
        /// The underlying parse failure.
        source: RecordError,
    },
    /// The search could not produce a path.
    Search(SearchError),
    /// An external map file could not be read.
    Io {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid engine config: {e}"),
            Self::Archive(e) => write!(f, "{e}"),
            Self::MapUnavailable { map_id } => {
                write!(f, "map {map_id} not found in archive")
            }
            Self::MapRejected { map_id, source } => {
                write!(f, "failed to load map {map_id}: {source}")
            }
            Self::Search(e) => write!(f, "{e}"),
            Self::Io { path, source } => {
                write!(f, "cannot read map file {}: {source}", path.display())
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Archive(e) => Some(e),
            Self::MapRejected { source, .. } => Some(source),
            Self::Search(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::MapUnavailable { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArchiveError> for EngineError {
    fn from(e: ArchiveError) -> Self {
        Self::Archive(e)
    }
}

impl From<SearchError> for EngineError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}
