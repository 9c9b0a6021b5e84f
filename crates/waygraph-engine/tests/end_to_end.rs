//! Archive-to-waypoints flows through a real engine.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::json;
use waygraph_engine::{EngineConfig, EngineError, ObstacleZone, PathEngine, Vec2};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

static NEXT_FIXTURE: AtomicU32 = AtomicU32::new(0);

fn fixture_path(tag: &str) -> PathBuf {
    let n = NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "waygraph-engine-{}-{tag}-{n}.zip",
        std::process::id()
    ))
}

fn write_archive(path: &Path, entries: &[(String, Vec<u8>)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options).unwrap();
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
        "teleports": [[0.0, 0.0, 0, 20.0, 0.0, 0, 1]],
    }))
    .unwrap()
}

fn corridor_engine(tag: &str) -> (PathEngine, PathBuf) {
    let path = fixture_path(tag);
    write_archive(&path, &[("7_corridor.json".to_owned(), corridor_record())]);
    let engine = PathEngine::open(EngineConfig::with_archive(&path)).unwrap();
    (engine, path)
}

#[test]
fn corridor_query_end_to_end() {
    let (engine, path) = corridor_engine("corridor");

    let found = engine
        .find_path(7, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 0.0)
        .unwrap();
    let xs: Vec<f32> = found.nodes.iter().map(|n| n.pos.x).collect();
    assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    assert_eq!(found.total_cost, 20.0);

    let _ = fs::remove_file(&path);
}

#[test]
fn range_decimates_through_the_engine() {
    let (engine, path) = corridor_engine("range");

    let found = engine
        .find_path(7, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 15.0)
        .unwrap();
    assert_eq!(found.nodes.len(), 2);
    assert_eq!(found.total_cost, 20.0);

    let _ = fs::remove_file(&path);
}

#[test]
fn unknown_map_names_the_id() {
    let (engine, path) = corridor_engine("unknown");

    match engine.find_path(99999, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 0.0) {
        Err(e @ EngineError::MapUnavailable { map_id: 99999 }) => {
            assert!(e.to_string().contains("99999"));
        }
        other => panic!("expected MapUnavailable, got {other:?}"),
    }
    assert!(!engine.has_map(99999));
    assert!(engine.has_map(7));

    let _ = fs::remove_file(&path);
}

#[test]
fn statistics_load_lazily_and_honor_overrides() {
    let path = fixture_path("stats");
    let record = serde_json::to_vec(&json!({
        "points": [[0, 0.0, 0.0]],
        "vis_graph": [[]],
        "stats": { "point_count": 42 },
    }))
    .unwrap();
    write_archive(&path, &[("3_stats.json".to_owned(), record)]);

    let engine = PathEngine::open(EngineConfig::with_archive(&path)).unwrap();
    assert!(engine.resident_map_ids().is_empty());

    let stats = engine.map_statistics(3).unwrap();
    assert_eq!(stats.point_count, 42, "record stats override derived counts");
    assert_eq!(engine.resident_map_ids(), vec![3]);

    let _ = fs::remove_file(&path);
}

#[test]
fn parsed_maps_stay_resident_without_the_archive() {
    let (engine, path) = corridor_engine("resident");

    engine
        .find_path(7, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 0.0)
        .unwrap();

    // The parsed map is resident; neither the archive nor the blob cache is
    // needed any more.
    fs::remove_file(&path).unwrap();
    engine.clear_blob_cache();

    let again = engine
        .find_path(7, Vec2::new(20.0, 0.0), Vec2::new(0.0, 0.0), 0.0)
        .unwrap();
    assert_eq!(again.nodes.len(), 3);
}

#[test]
fn external_file_bypasses_the_archive() {
    let (engine, path) = corridor_engine("external");

    let external = fixture_path("external-json").with_extension("json");
    fs::write(
        &external,
        serde_json::to_vec(&json!({
            "points": [[0, 0.0, 0.0], [1, 5.0, 0.0]],
            "vis_graph": [[[1, 5.0]], [[0, 5.0]]],
        }))
        .unwrap(),
    )
    .unwrap();

    engine.load_map_from_file(5000, &external).unwrap();
    let found = engine
        .find_path(5000, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 0.0)
        .unwrap();
    assert_eq!(found.total_cost, 5.0);

    // The external map is resident but not part of the archive listing.
    assert!(!engine.has_map(5000));
    assert_eq!(engine.available_map_ids(), &[7]);

    let _ = fs::remove_file(&external);
    let _ = fs::remove_file(&path);
}

#[test]
fn malformed_archive_record_is_rejected_atomically() {
    let path = fixture_path("malformed");
    write_archive(
        &path,
        &[("9_broken.json".to_owned(), b"{\"points\": \"oops\"}".to_vec())],
    );

    let engine = PathEngine::open(EngineConfig::with_archive(&path)).unwrap();
    match engine.find_path(9, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 0.0) {
        Err(EngineError::MapRejected { map_id: 9, .. }) => {}
        other => panic!("expected MapRejected, got {other:?}"),
    }
    assert!(engine.resident_map_ids().is_empty(), "nothing was stored");

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_archive_fails_at_open() {
    let config = EngineConfig::with_archive("/nonexistent/waygraph/maps.zip");
    match PathEngine::open(config) {
        Err(EngineError::Archive(_)) => {}
        Err(other) => panic!("expected Archive error, got {other:?}"),
        Ok(_) => panic!("open unexpectedly succeeded"),
    }
}

#[test]
fn obstacle_query_avoids_blocked_points() {
    let path = fixture_path("obstacle");
    let record = serde_json::to_vec(&json!({
        "points": [
            [0, 0.0, 0.0], [1, 10.0, 0.0], [2, 20.0, 0.0],
            [3, 10.0, 8.0],
        ],
        "vis_graph": [
            [[1, 10.0], [3, 12.8]],
            [[0, 10.0], [2, 10.0]],
            [[1, 10.0], [3, 12.8]],
            [[0, 12.8], [2, 12.8]],
        ],
    }))
    .unwrap();
    write_archive(&path, &[("11_detour.json".to_owned(), record)]);

    let engine = PathEngine::open(EngineConfig::with_archive(&path)).unwrap();
    let obstacles = [ObstacleZone::new(Vec2::new(10.0, 0.0), 3.0)];
    let found = engine
        .find_path_with_obstacles(11, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), &obstacles, 0.0)
        .unwrap();

    assert!(found.nodes.iter().all(|n| !obstacles[0].contains(n.pos)));
    assert!(found.total_cost > 20.0);

    let _ = fs::remove_file(&path);
}

#[test]
fn concurrent_queries_share_one_parsed_map() {
    let (engine, path) = corridor_engine("concurrent");
    let engine = Arc::new(engine);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let flip = i % 2 == 0;
                let (a, b) = if flip { (0.0, 20.0) } else { (20.0, 0.0) };
                engine
                    .find_path(7, Vec2::new(a, 0.0), Vec2::new(b, 0.0), 0.0)
                    .unwrap()
                    .total_cost
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 20.0);
    }
    assert_eq!(engine.resident_map_ids(), vec![7]);

    let _ = fs::remove_file(&path);
}
