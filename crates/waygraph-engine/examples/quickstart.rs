//! Waygraph quickstart — a complete, minimal pathfinding session.
//!
//! Demonstrates:
//!   1. Building a tiny map archive on disk
//!   2. Opening a [`PathEngine`] over it
//!   3. Running plain and obstacle-aware path queries
//!   4. Decimating a path with a waypoint spacing
//!
//! Run with:
//!   cargo run --example quickstart

use std::fs::File;
use std::io::Write;

use serde_json::json;
use waygraph_engine::{EngineConfig, ObstacleZone, PathEngine, Vec2};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAP_ID: i32 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Waygraph Quickstart ===\n");

    // 1. Build a small archive: a straight lane with a raised bypass row.
    let record = json!({
        "map_ids": [MAP_ID],
        "points": [
            [0, 0.0, 0.0], [1, 10.0, 0.0], [2, 20.0, 0.0], [3, 30.0, 0.0],
            [4, 10.0, 8.0, 1], [5, 20.0, 8.0, 1],
        ],
        "vis_graph": [
            [[1, 10.0], [4, 12.8]],
            [[0, 10.0], [2, 10.0]],
            [[1, 10.0], [3, 10.0]],
            [[2, 10.0], [5, 12.8]],
            [[0, 12.8], [5, 10.0]],
            [[4, 10.0], [3, 12.8]],
        ],
        "trapezoids": [
            [0, 0, -5.0, -5.0, 35.0, -5.0, 35.0, 5.0, -5.0, 5.0],
            [1, 1, 5.0, 5.0, 25.0, 5.0, 25.0, 11.0, 5.0, 11.0],
        ],
    });

    let archive_path = std::env::temp_dir().join(format!(
        "waygraph-quickstart-{}.zip",
        std::process::id()
    ));
    let mut writer = ZipWriter::new(File::create(&archive_path)?);
    writer.start_file(
        format!("{MAP_ID}_quickstart_lane.json"),
        SimpleFileOptions::default(),
    )?;
    writer.write_all(serde_json::to_vec(&record)?.as_slice())?;
    writer.finish()?;
    println!("Archive: {}", archive_path.display());

    // 2. Open the engine.
    let engine = PathEngine::open(EngineConfig::with_archive(&archive_path))?;
    println!("Available maps: {:?}\n", engine.available_map_ids());

    // 3. A plain query along the lane.
    let start = Vec2::new(0.0, 0.0);
    let goal = Vec2::new(30.0, 0.0);
    let path = engine.find_path(MAP_ID, start, goal, 0.0)?;
    println!("Plain query ({} waypoints, cost {:.1}):", path.nodes.len(), path.total_cost);
    for node in &path.nodes {
        println!("  ({:>5.1}, {:>5.1}) layer {}", node.pos.x, node.pos.y, node.layer);
    }

    // 4. Block the middle of the lane; the route climbs the bypass row.
    let obstacles = [ObstacleZone::new(Vec2::new(15.0, 0.0), 6.0)];
    let detour = engine.find_path_with_obstacles(MAP_ID, start, goal, &obstacles, 0.0)?;
    println!(
        "\nWith an obstacle at (15, 0) r=6 ({} waypoints, cost {:.1}):",
        detour.nodes.len(),
        detour.total_cost
    );
    for node in &detour.nodes {
        println!("  ({:>5.1}, {:>5.1}) layer {}", node.pos.x, node.pos.y, node.layer);
    }

    // 5. Decimate the detour, keeping the layer changes.
    let sparse = engine.find_path_with_obstacles(MAP_ID, start, goal, &obstacles, 25.0)?;
    println!("\nDecimated to 25-unit spacing: {} waypoints", sparse.nodes.len());

    let _ = std::fs::remove_file(&archive_path);
    println!("\nDone.");
    Ok(())
}
