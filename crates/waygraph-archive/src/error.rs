//! Error types for archive access and the lazy map store.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use waygraph_core::RecordError;

/// Errors from opening or reading the map archive.
#[derive(Debug)]
pub enum ArchiveError {
    /// The archive file could not be opened or read.
    Io {
        /// Path of the archive.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The file is not a readable zip container.
    Malformed {
        /// Path of the archive.
        path: PathBuf,
        /// The underlying zip error.
        source: zip::result::ZipError,
    },
    /// A named entry does not exist in the archive.
    EntryNotFound {
        /// Name of the missing entry.
        name: String,
    },
    /// An entry exists but its contents could not be read.
    EntryRead {
        /// Name of the entry.
        name: String,
        /// The underlying read error.
        source: io::Error,
    },
    /// No `.json` entry matches the `<map_id>_` prefix.
    MapNotFound {
        /// The requested map id.
        map_id: i32,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read archive {}: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "archive {} is not a valid zip: {source}", path.display())
            }
            Self::EntryNotFound { name } => write!(f, "entry '{name}' not found in archive"),
            Self::EntryRead { name, source } => {
                write!(f, "failed to read entry '{name}': {source}")
            }
            Self::MapNotFound { map_id } => {
                write!(f, "map {map_id} not found in archive")
            }
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::EntryRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from the lazy map store: either the blob could not be obtained,
/// or it failed to decode.
#[derive(Debug)]
pub enum StoreError {
    /// The archive layer failed.
    Archive(ArchiveError),
    /// The record was extracted but rejected by the parser.
    Record {
        /// The map whose record was rejected.
        map_id: i32,
        /// The underlying parse failure.
        source: RecordError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive(e) => write!(f, "{e}"),
            Self::Record { map_id, source } => {
                write!(f, "map {map_id} record rejected: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Archive(e) => Some(e),
            Self::Record { source, .. } => Some(source),
        }
    }
}

impl From<ArchiveError> for StoreError {
    fn from(e: ArchiveError) -> Self {
        Self::Archive(e)
    }
}
