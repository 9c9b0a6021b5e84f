//! Path query entry points.

use std::panic::{catch_unwind, AssertUnwindSafe};

use waygraph_core::Vec2;

use crate::instance::ensure_engine;
use crate::result::{ObstacleZone, PathResult};
use crate::status::PathStatus;

fn find_path_impl(
    map_id: i32,
    start_x: f32,
    start_y: f32,
    dest_x: f32,
    dest_y: f32,
    obstacles: &[ObstacleZone],
    range: f32,
) -> *mut PathResult {
    let engine = match ensure_engine() {
        Ok(engine) => engine,
        Err(status) => return PathResult::failure(status, "failed to initialize pathfinder"),
    };

    let zones: Vec<waygraph_core::ObstacleZone> = obstacles
        .iter()
        .map(|zone| waygraph_core::ObstacleZone::new(Vec2::new(zone.x, zone.y), zone.radius))
        .collect();

    let start = Vec2::new(start_x, start_y);
    let goal = Vec2::new(dest_x, dest_y);
    let outcome = engine.find_path_with_obstacles(map_id, start, goal, &zones, range);

    match outcome {
        Ok(found) => PathResult::success(&found),
        Err(e) => PathResult::failure(PathStatus::from(&e), &e.to_string()),
    }
}

/// Find a path on `map_id` from `(start_x, start_y)` to `(dest_x, dest_y)`.
///
/// `range > 0` decimates the returned waypoints to that minimum spacing.
/// The result must be released with `FreePathResult`. Never returns null.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn FindPath(
    map_id: i32,
    start_x: f32,
    start_y: f32,
    dest_x: f32,
    dest_y: f32,
    range: f32,
) -> *mut PathResult {
    catch_unwind(|| find_path_impl(map_id, start_x, start_y, dest_x, dest_y, &[], range))
        .unwrap_or_else(|_| PathResult::failure(PathStatus::Unknown, "panic in FindPath"))
}

/// [`FindPath`] with circular no-go zones.
///
/// `obstacles` may be null when `obstacle_count <= 0`; both degrade to a
/// plain query. The result must be released with `FreePathResult`. Never
/// returns null.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn FindPathWithObstacles(
    map_id: i32,
    start_x: f32,
    start_y: f32,
    dest_x: f32,
    dest_y: f32,
    obstacles: *const ObstacleZone,
    obstacle_count: i32,
    range: f32,
) -> *mut PathResult {
    let zones: &[ObstacleZone] = if obstacles.is_null() || obstacle_count <= 0 {
        &[]
    } else {
        // SAFETY: obstacles points to obstacle_count valid ObstacleZone
        // structs per caller contract.
        unsafe { std::slice::from_raw_parts(obstacles, obstacle_count as usize) }
    };

    catch_unwind(AssertUnwindSafe(|| {
        find_path_impl(map_id, start_x, start_y, dest_x, dest_y, zones, range)
    }))
    .unwrap_or_else(|_| PathResult::failure(PathStatus::Unknown, "panic in FindPathWithObstacles"))
}
