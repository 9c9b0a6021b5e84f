//! C-layout result envelopes and their allocation discipline.
//!
//! Every envelope handed to the host is heap-allocated here and reclaimed by
//! the matching `Free*` entry point; the free functions accept null. Error
//! messages are truncated to 255 bytes plus a trailing NUL.

use std::os::raw::c_char;

use waygraph_engine::FoundPath;

use crate::status::PathStatus;

/// Byte length of the `error_message` buffers, NUL included.
pub const MESSAGE_CAPACITY: usize = 256;

/// One waypoint of a returned path.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathPoint {
    /// Horizontal world coordinate.
    pub x: f32,
    /// Vertical world coordinate.
    pub y: f32,
    /// Vertical layer (0 = ground, positive = elevated).
    pub layer: i32,
}

/// A circular no-go zone supplied by the host.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObstacleZone {
    /// Center X coordinate.
    pub x: f32,
    /// Center Y coordinate.
    pub y: f32,
    /// Radius of the zone.
    pub radius: f32,
}

/// Result envelope of a path query.
#[repr(C)]
pub struct PathResult {
    /// Waypoints, or null when no path was produced.
    pub points: *mut PathPoint,
    /// Number of waypoints behind `points`.
    pub point_count: i32,
    /// Summed Euclidean cost of the returned waypoints; -1 on failure.
    pub total_cost: f32,
    /// A [`PathStatus`] value.
    pub error_code: i32,
    /// NUL-terminated failure description (empty on success).
    pub error_message: [c_char; MESSAGE_CAPACITY],
}

impl PathResult {
    /// Allocate a success envelope carrying the found path.
    pub(crate) fn success(found: &FoundPath) -> *mut PathResult {
        let points: Vec<PathPoint> = found
            .nodes
            .iter()
            .map(|node| PathPoint {
                x: node.pos.x,
                y: node.pos.y,
                layer: node.layer,
            })
            .collect();
        let point_count = points.len() as i32;
        let points = Box::into_raw(points.into_boxed_slice()) as *mut PathPoint;

        Box::into_raw(Box::new(PathResult {
            points,
            point_count,
            total_cost: found.total_cost,
            error_code: PathStatus::Ok as i32,
            error_message: [0; MESSAGE_CAPACITY],
        }))
    }

    /// Allocate a failure envelope with the given status and message.
    pub(crate) fn failure(status: PathStatus, message: &str) -> *mut PathResult {
        Box::into_raw(Box::new(PathResult {
            points: std::ptr::null_mut(),
            point_count: 0,
            total_cost: -1.0,
            error_code: status as i32,
            error_message: bounded_message(message),
        }))
    }
}

/// Per-map statistics envelope.
#[repr(C)]
pub struct MapStats {
    /// Number of walkable trapezoids.
    pub trapezoid_count: i32,
    /// Number of navigation points.
    pub point_count: i32,
    /// Number of teleporters.
    pub teleport_count: i32,
    /// Number of travel portals.
    pub travel_portal_count: i32,
    /// Number of NPC travels.
    pub npc_travel_count: i32,
    /// Number of enter travels.
    pub enter_travel_count: i32,
    /// A [`PathStatus`] value.
    pub error_code: i32,
    /// NUL-terminated failure description (empty on success).
    pub error_message: [c_char; MESSAGE_CAPACITY],
}

impl MapStats {
    pub(crate) fn success(stats: &waygraph_engine::MapStatistics) -> *mut MapStats {
        Box::into_raw(Box::new(MapStats {
            trapezoid_count: stats.trapezoid_count,
            point_count: stats.point_count,
            teleport_count: stats.teleport_count,
            travel_portal_count: stats.travel_portal_count,
            npc_travel_count: stats.npc_travel_count,
            enter_travel_count: stats.enter_travel_count,
            error_code: PathStatus::Ok as i32,
            error_message: [0; MESSAGE_CAPACITY],
        }))
    }

    pub(crate) fn failure(status: PathStatus, message: &str) -> *mut MapStats {
        Box::into_raw(Box::new(MapStats {
            trapezoid_count: 0,
            point_count: 0,
            teleport_count: 0,
            travel_portal_count: 0,
            npc_travel_count: 0,
            enter_travel_count: 0,
            error_code: status as i32,
            error_message: bounded_message(message),
        }))
    }
}

/// Copy `message` into a fixed buffer, truncated to 255 bytes, always
/// NUL-terminated.
pub(crate) fn bounded_message(message: &str) -> [c_char; MESSAGE_CAPACITY] {
    let mut buffer = [0 as c_char; MESSAGE_CAPACITY];
    for (slot, byte) in buffer[..MESSAGE_CAPACITY - 1]
        .iter_mut()
        .zip(message.bytes())
    {
        *slot = byte as c_char;
    }
    buffer
}

/// Release a [`PathResult`] and its waypoint array.
///
/// Accepts null. Must be called exactly once per returned envelope.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn FreePathResult(result: *mut PathResult) {
    if result.is_null() {
        return;
    }
    // SAFETY: result came from Box::into_raw in success()/failure(), and the
    // points array (when present) from Box::into_raw of a boxed slice of
    // exactly point_count elements.
    unsafe {
        let result = Box::from_raw(result);
        if !result.points.is_null() {
            let slice =
                std::ptr::slice_from_raw_parts_mut(result.points, result.point_count as usize);
            drop(Box::from_raw(slice));
        }
    }
}

/// Release a [`MapStats`] envelope.
///
/// Accepts null. Must be called exactly once per returned envelope.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn FreeMapStats(stats: *mut MapStats) {
    if stats.is_null() {
        return;
    }
    // SAFETY: stats came from Box::into_raw in success()/failure().
    unsafe {
        drop(Box::from_raw(stats));
    }
}
