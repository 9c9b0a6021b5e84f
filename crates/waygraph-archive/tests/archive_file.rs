//! On-disk archive round trips: open, scan, extract, and lazy store loads.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use serde_json::json;
use waygraph_archive::{ArchiveError, ArchiveReader, MapStore, StoreError};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

static NEXT_FIXTURE: AtomicU32 = AtomicU32::new(0);

/// A collision-free scratch path under the system temp directory.
fn fixture_path(tag: &str) -> PathBuf {
    let n = NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "waygraph-archive-{}-{tag}-{n}.zip",
        std::process::id()
    ))
}

fn write_archive(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

fn corridor_record() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "points": [[0, 0.0, 0.0], [1, 10.0, 0.0], [2, 20.0, 0.0]],
        "vis_graph": [
            [[1, 10.0]],
            [[0, 10.0], [2, 10.0]],
            [[1, 10.0]],
        ],
    }))
    .unwrap()
}

#[test]
fn open_scans_available_ids() {
    let path = fixture_path("scan");
    write_archive(
        &path,
        &[
            ("20_ascalon_foothills.json", corridor_record()),
            ("3_ashford.json", corridor_record()),
            ("notes.txt", b"not a map".to_vec()),
        ],
    );

    let reader = ArchiveReader::open(&path).unwrap();
    assert_eq!(reader.available_ids(), &[3, 20]);
    assert!(reader.has_map(3));
    assert!(!reader.has_map(4));

    let mut names = reader.entry_names().unwrap();
    names.sort();
    assert_eq!(
        names,
        vec!["20_ascalon_foothills.json", "3_ashford.json", "notes.txt"]
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn extract_map_returns_record_bytes() {
    let path = fixture_path("extract");
    write_archive(&path, &[("5_catacombs.json", corridor_record())]);

    let reader = ArchiveReader::open(&path).unwrap();
    assert_eq!(reader.extract_map(5).unwrap(), corridor_record());
    assert_eq!(
        reader.extract("5_catacombs.json").unwrap(),
        corridor_record()
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn unknown_map_error_names_the_id() {
    let path = fixture_path("unknown");
    write_archive(&path, &[("5_catacombs.json", corridor_record())]);

    let reader = ArchiveReader::open(&path).unwrap();
    match reader.extract_map(99999) {
        Err(e @ ArchiveError::MapNotFound { map_id: 99999 }) => {
            assert!(e.to_string().contains("99999"));
        }
        other => panic!("expected MapNotFound, got {other:?}"),
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn store_serves_cached_blob_after_archive_disappears() {
    let path = fixture_path("cached");
    write_archive(&path, &[("5_catacombs.json", corridor_record())]);

    let store = MapStore::open(&path, 4).unwrap();
    assert_eq!(store.cached_blob_count(), 0);
    store.load_blob(5).unwrap();
    assert_eq!(store.cached_blob_count(), 1);

    // The blob now lives in the cache; removing the archive must not matter.
    fs::remove_file(&path).unwrap();
    assert_eq!(store.load_blob(5).unwrap().as_ref(), corridor_record());

    // A cold id has to go back to the (now missing) archive.
    match store.load_blob(6) {
        Err(ArchiveError::Io { .. }) => {}
        other => panic!("expected Io error, got {other:?}"),
    }

    // Clearing the cache makes the cached id cold too.
    store.clear_cache();
    assert!(store.load_blob(5).is_err());
}

#[test]
fn load_map_parses_and_restamps_requested_id() {
    let path = fixture_path("restamp");
    let aliased = serde_json::to_vec(&json!({
        "map_ids": [777, 778],
        "points": [[0, 0.0, 0.0]],
        "vis_graph": [[]],
    }))
    .unwrap();
    write_archive(&path, &[("777_aliased.json", aliased)]);

    let store = MapStore::open(&path, 4).unwrap();
    let map = store.load_map(777).unwrap();
    assert_eq!(map.map_id, 777);
    assert_eq!(map.points.len(), 1);

    let _ = fs::remove_file(&path);
}

#[test]
fn load_map_rejects_malformed_record() {
    let path = fixture_path("malformed");
    write_archive(&path, &[("9_broken.json", b"{ \"points\": 3 }".to_vec())]);

    let store = MapStore::open(&path, 4).unwrap();
    match store.load_map(9) {
        Err(e @ StoreError::Record { map_id: 9, .. }) => {
            assert!(e.to_string().contains('9'));
        }
        other => panic!("expected Record error, got {other:?}"),
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn open_rejects_non_zip_file() {
    let path = fixture_path("notzip");
    fs::write(&path, b"this is not a zip archive").unwrap();

    match ArchiveReader::open(&path) {
        Err(ArchiveError::Malformed { .. }) => {}
        other => panic!("expected Malformed, got {other:?}"),
    }

    let _ = fs::remove_file(&path);
}
