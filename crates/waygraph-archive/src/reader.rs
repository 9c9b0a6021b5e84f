//! Read-only access to the zip map archive.
//!
//! Entries are named `<map_id>_<human-readable-tag>.json`; the decimal prefix
//! before the first underscore identifies the map. The archive is scanned
//! once at open to collect the set of available ids; every later extraction
//! re-opens the file under a mutex and releases it before returning, keeping
//! no file handle resident between calls.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Reader over a single read-only map archive.
///
/// Safe for concurrent use: archive open/read/close sequences are serialised
/// on an internal mutex, and the scanned id list is immutable after `open`.
#[derive(Debug)]
pub struct ArchiveReader {
    path: PathBuf,
    /// Map ids found at scan time, sorted ascending, deduplicated.
    available: Vec<i32>,
    archive_lock: Mutex<()>,
}

impl ArchiveReader {
    /// Open an archive, verify it is a readable zip, and scan its map ids.
    ///
    /// Entry names whose prefix does not parse as a decimal integer are
    /// silently ignored.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let path = path.into();
        let mut archive = open_zip(&path)?;
        let available = scan_map_ids(&mut archive);
        Ok(Self {
            path,
            available,
            archive_lock: Mutex::new(()),
        })
    }

    /// Path this reader was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All map ids present in the archive, sorted ascending.
    pub fn available_ids(&self) -> &[i32] {
        &self.available
    }

    /// Whether the archive contains a record for `map_id`.
    pub fn has_map(&self, map_id: i32) -> bool {
        self.available.binary_search(&map_id).is_ok()
    }

    /// Names of all entries in the archive.
    pub fn entry_names(&self) -> Result<Vec<String>, ArchiveError> {
        let _guard = self.archive_lock.lock().unwrap();
        let archive = open_zip(&self.path)?;
        Ok(archive.file_names().map(str::to_owned).collect())
    }

    /// Extract a single entry by its exact name.
    pub fn extract(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let _guard = self.archive_lock.lock().unwrap();
        let mut archive = open_zip(&self.path)?;
        read_entry(&mut archive, name)
    }

    /// Extract the record for `map_id`.
    ///
    /// The first `.json` entry whose name starts with `"<map_id>_"` wins.
    pub fn extract_map(&self, map_id: i32) -> Result<Vec<u8>, ArchiveError> {
        let _guard = self.archive_lock.lock().unwrap();
        let mut archive = open_zip(&self.path)?;
        let name = match find_map_entry(&archive, map_id) {
            Some(name) => name,
            None => return Err(ArchiveError::MapNotFound { map_id }),
        };
        read_entry(&mut archive, &name)
    }
}

fn open_zip(path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| ArchiveError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect the map id of every `.json` entry whose name-prefix before the
/// first underscore parses as a decimal integer.
fn scan_map_ids<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Vec<i32> {
    let mut ids: Vec<i32> = archive.file_names().filter_map(parse_map_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn parse_map_id(name: &str) -> Option<i32> {
    if !name.contains(".json") {
        return None;
    }
    let (prefix, _) = name.split_once('_')?;
    prefix.parse().ok()
}

fn find_map_entry<R: Read + Seek>(archive: &ZipArchive<R>, map_id: i32) -> Option<String> {
    let prefix = format!("{map_id}_");
    archive
        .file_names()
        .find(|name| name.starts_with(&prefix) && name.contains(".json"))
        .map(str::to_owned)
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, ArchiveError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::EntryNotFound {
                name: name.to_owned(),
            })
        }
        Err(e) => {
            return Err(ArchiveError::EntryRead {
                name: name.to_owned(),
                source: e.into(),
            })
        }
    };
    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .map_err(|source| ArchiveError::EntryRead {
            name: name.to_owned(),
            source,
        })?;
    Ok(contents)
}
