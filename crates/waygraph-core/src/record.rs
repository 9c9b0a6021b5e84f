//! Decoder for the textual per-map record format.
//!
//! A record is a JSON object of positional arrays (see the archive layout
//! docs in `waygraph-archive`). Only `points` and `vis_graph` are required.
//! Entries shorter than their arity are skipped, matching the producer's
//! tolerance for trailing partial rows; an element of the wrong JSON type
//! rejects the whole record.

use serde_json::Value;
use smallvec::SmallVec;

use crate::error::RecordError;
use crate::geometry::{Trapezoid, Vec2};
use crate::model::{
    EnterTravel, MapData, NpcTravel, Point, PortalConnection, Teleporter, TeleporterDirection,
    TravelPortal, VisibilityEdge,
};

/// Decode one per-map record into a [`MapData`].
///
/// `map_id` seeds the map's identity; a non-empty `map_ids` section overrides
/// it (the map store re-stamps the requested id after parsing, so the two
/// agree on every load path). Rejection is atomic: an `Err` means nothing was
/// stored.
pub fn parse_map_record(map_id: i32, bytes: &[u8]) -> Result<MapData, RecordError> {
    let root: Value = serde_json::from_slice(bytes)?;
    let obj = match root.as_object() {
        Some(o) => o,
        None => return Err(RecordError::NotAnObject),
    };

    let mut map = MapData {
        map_id,
        ..MapData::default()
    };

    // A record may describe several aliased ids; the first one names the map.
    if let Some(ids) = obj.get("map_ids").and_then(Value::as_array) {
        if let Some(first) = ids.first() {
            map.map_id = as_i32(first, "map_ids")?;
        }
    }

    parse_points(obj, &mut map)?;
    parse_vis_graph(obj, &mut map)?;
    parse_trapezoids(obj, &mut map)?;
    parse_teleports(obj, &mut map)?;
    parse_travel_portals(obj, &mut map)?;
    parse_npc_travel(obj, &mut map)?;
    parse_enter_travel(obj, &mut map)?;

    map.stats = map.derived_stats();
    apply_stats_overrides(obj, &mut map)?;

    if !map.is_valid() {
        return Err(RecordError::InvalidMap);
    }
    Ok(map)
}

/// `points`: `[id, x, y, layer?]`, required. Insertion order is the identity:
/// `points[i].id` must equal `i`.
fn parse_points(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("points").and_then(Value::as_array) {
        Some(a) => a,
        None => return Err(RecordError::MissingSection { section: "points" }),
    };

    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 3 => t,
            _ => continue,
        };
        let id = as_i32(&tuple[0], "points")?;
        let x = as_f32(&tuple[1], "points")?;
        let y = as_f32(&tuple[2], "points")?;
        let layer = match tuple.get(3) {
            Some(v) => as_i32(v, "points")?,
            None => 0,
        };
        map.points.push(Point {
            id,
            pos: Vec2::new(x, y),
            layer,
        });
    }

    for (index, point) in map.points.iter().enumerate() {
        if point.id != index as i32 {
            return Err(RecordError::PointIdMismatch {
                index,
                found: point.id,
            });
        }
    }
    Ok(())
}

/// `vis_graph`: one array of `[target_id, distance, blocking_layers?]` edges
/// per point, required. Edges pointing outside the point list are dropped.
fn parse_vis_graph(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let rows = match obj.get("vis_graph").and_then(Value::as_array) {
        Some(a) => a,
        None => return Err(RecordError::MissingSection { section: "vis_graph" }),
    };

    let point_count = map.points.len() as i32;
    map.visibility_graph = vec![Vec::new(); rows.len()];

    for (i, row) in rows.iter().enumerate() {
        let edges = match row.as_array() {
            Some(a) => a,
            None => continue,
        };
        for edge in edges {
            let tuple = match edge.as_array() {
                Some(t) if t.len() >= 2 => t,
                _ => continue,
            };
            let target_id = as_i32(&tuple[0], "vis_graph")?;
            let distance = as_f32(&tuple[1], "vis_graph")?;

            let mut blocking_layers = SmallVec::new();
            if let Some(layers) = tuple.get(2).and_then(Value::as_array) {
                for layer in layers {
                    blocking_layers.push(as_u32(layer, "vis_graph")?);
                }
            }

            if target_id < 0 || target_id >= point_count {
                continue;
            }
            map.visibility_graph[i].push(VisibilityEdge {
                target_id,
                distance,
                blocking_layers,
            });
        }
    }
    Ok(())
}

/// `trapezoids`: `[id, layer, ax, ay, bx, by, cx, cy, dx, dy]`.
fn parse_trapezoids(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("trapezoids").and_then(Value::as_array) {
        Some(a) => a,
        None => return Ok(()),
    };
    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 10 => t,
            _ => continue,
        };
        let id = as_i32(&tuple[0], "trapezoids")?;
        let layer = as_i32(&tuple[1], "trapezoids")?;
        let mut coords = [0.0f32; 8];
        for (slot, value) in coords.iter_mut().zip(&tuple[2..10]) {
            *slot = as_f32(value, "trapezoids")?;
        }
        map.trapezoids.push(Trapezoid {
            id,
            layer,
            vertices: [
                Vec2::new(coords[0], coords[1]),
                Vec2::new(coords[2], coords[3]),
                Vec2::new(coords[4], coords[5]),
                Vec2::new(coords[6], coords[7]),
            ],
        });
    }
    Ok(())
}

/// `teleports`: `[enter_x, enter_y, enter_layer, exit_x, exit_y, exit_layer, direction?]`.
fn parse_teleports(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("teleports").and_then(Value::as_array) {
        Some(a) => a,
        None => return Ok(()),
    };
    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 6 => t,
            _ => continue,
        };
        let enter = Vec2::new(as_f32(&tuple[0], "teleports")?, as_f32(&tuple[1], "teleports")?);
        let enter_layer = as_i32(&tuple[2], "teleports")?;
        let exit = Vec2::new(as_f32(&tuple[3], "teleports")?, as_f32(&tuple[4], "teleports")?);
        let exit_layer = as_i32(&tuple[5], "teleports")?;
        let direction = match tuple.get(6) {
            Some(v) => TeleporterDirection::from_record(as_i32(v, "teleports")?),
            None => TeleporterDirection::OneWay,
        };
        map.teleporters.push(Teleporter {
            enter,
            enter_layer,
            exit,
            exit_layer,
            direction,
        });
    }
    Ok(())
}

/// `travel_portals`: `[x, y, [[dest_map_id, dest_x, dest_y], ...]?]`.
fn parse_travel_portals(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("travel_portals").and_then(Value::as_array) {
        Some(a) => a,
        None => return Ok(()),
    };
    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 2 => t,
            _ => continue,
        };
        let position = Vec2::new(
            as_f32(&tuple[0], "travel_portals")?,
            as_f32(&tuple[1], "travel_portals")?,
        );
        let mut connections = Vec::new();
        if let Some(conns) = tuple.get(2).and_then(Value::as_array) {
            for conn in conns {
                let conn = match conn.as_array() {
                    Some(c) if c.len() >= 3 => c,
                    _ => continue,
                };
                connections.push(PortalConnection {
                    dest_map_id: as_i32(&conn[0], "travel_portals")?,
                    dest_pos: Vec2::new(
                        as_f32(&conn[1], "travel_portals")?,
                        as_f32(&conn[2], "travel_portals")?,
                    ),
                });
            }
        }
        map.travel_portals.push(TravelPortal {
            position,
            connections,
        });
    }
    Ok(())
}

/// `npc_travel`: `[npc_x, npc_y, d1, d2, d3, d4, d5, dest_map_id, dest_x, dest_y]`.
fn parse_npc_travel(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("npc_travel").and_then(Value::as_array) {
        Some(a) => a,
        None => return Ok(()),
    };
    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 10 => t,
            _ => continue,
        };
        let npc_pos = Vec2::new(as_f32(&tuple[0], "npc_travel")?, as_f32(&tuple[1], "npc_travel")?);
        let mut dialog_ids = [0i32; 5];
        for (slot, value) in dialog_ids.iter_mut().zip(&tuple[2..7]) {
            *slot = as_i32(value, "npc_travel")?;
        }
        map.npc_travels.push(NpcTravel {
            npc_pos,
            dialog_ids,
            dest_map_id: as_i32(&tuple[7], "npc_travel")?,
            dest_pos: Vec2::new(as_f32(&tuple[8], "npc_travel")?, as_f32(&tuple[9], "npc_travel")?),
        });
    }
    Ok(())
}

/// `enter_travel`: `[enter_x, enter_y, dest_map_id, dest_x, dest_y]`.
fn parse_enter_travel(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let entries = match obj.get("enter_travel").and_then(Value::as_array) {
        Some(a) => a,
        None => return Ok(()),
    };
    for entry in entries {
        let tuple = match entry.as_array() {
            Some(t) if t.len() >= 5 => t,
            _ => continue,
        };
        map.enter_travels.push(EnterTravel {
            enter_pos: Vec2::new(as_f32(&tuple[0], "enter_travel")?, as_f32(&tuple[1], "enter_travel")?),
            dest_map_id: as_i32(&tuple[2], "enter_travel")?,
            dest_pos: Vec2::new(as_f32(&tuple[3], "enter_travel")?, as_f32(&tuple[4], "enter_travel")?),
        });
    }
    Ok(())
}

/// `stats`: an object of counts; present fields override derived counts.
fn apply_stats_overrides(
    obj: &serde_json::Map<String, Value>,
    map: &mut MapData,
) -> Result<(), RecordError> {
    let stats = match obj.get("stats").and_then(Value::as_object) {
        Some(s) => s,
        None => return Ok(()),
    };
    let overrides: [(&str, &mut i32); 6] = [
        ("trapezoid_count", &mut map.stats.trapezoid_count),
        ("point_count", &mut map.stats.point_count),
        ("teleport_count", &mut map.stats.teleport_count),
        ("travel_portal_count", &mut map.stats.travel_portal_count),
        ("npc_travel_count", &mut map.stats.npc_travel_count),
        ("enter_travel_count", &mut map.stats.enter_travel_count),
    ];
    for (key, slot) in overrides {
        if let Some(v) = stats.get(key) {
            *slot = as_i32(v, "stats")?;
        }
    }
    Ok(())
}

// ── scalar accessors ─────────────────────────────────────────

fn as_i32(v: &Value, section: &'static str) -> Result<i32, RecordError> {
    match v.as_i64() {
        Some(n) => Ok(n as i32),
        None => Err(RecordError::TypeMismatch { section }),
    }
}

fn as_u32(v: &Value, section: &'static str) -> Result<u32, RecordError> {
    match v.as_u64() {
        Some(n) => Ok(n as u32),
        None => Err(RecordError::TypeMismatch { section }),
    }
}

fn as_f32(v: &Value, section: &'static str) -> Result<f32, RecordError> {
    match v.as_f64() {
        Some(n) => Ok(n as f32),
        None => Err(RecordError::TypeMismatch { section }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn corridor_record() -> Vec<u8> {
        record_bytes(json!({
            "points": [[0, 0.0, 0.0], [1, 10.0, 0.0, 0], [2, 20.0, 0.0]],
            "vis_graph": [
                [[1, 10.0]],
                [[0, 10.0], [2, 10.0]],
                [[1, 10.0]],
            ],
        }))
    }

    #[test]
    fn parses_minimal_record() {
        let map = parse_map_record(42, &corridor_record()).unwrap();
        assert_eq!(map.map_id, 42);
        assert_eq!(map.points.len(), 3);
        assert_eq!(map.visibility_graph.len(), 3);
        assert_eq!(map.points[1].pos, Vec2::new(10.0, 0.0));
        assert_eq!(map.visibility_graph[1].len(), 2);
    }

    #[test]
    fn point_layer_defaults_to_ground() {
        let map = parse_map_record(42, &corridor_record()).unwrap();
        assert!(map.points.iter().all(|p| p.layer == 0));
    }

    #[test]
    fn map_ids_overrides_seed_id() {
        let bytes = record_bytes(json!({
            "map_ids": [123, 456],
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
        }));
        let map = parse_map_record(42, &bytes).unwrap();
        assert_eq!(map.map_id, 123);
    }

    #[test]
    fn missing_points_is_rejected() {
        let bytes = record_bytes(json!({ "vis_graph": [[]] }));
        match parse_map_record(1, &bytes) {
            Err(RecordError::MissingSection { section: "points" }) => {}
            other => panic!("expected MissingSection(points), got {other:?}"),
        }
    }

    #[test]
    fn missing_vis_graph_is_rejected() {
        let bytes = record_bytes(json!({ "points": [[0, 0.0, 0.0]] }));
        match parse_map_record(1, &bytes) {
            Err(RecordError::MissingSection { section: "vis_graph" }) => {}
            other => panic!("expected MissingSection(vis_graph), got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        match parse_map_record(1, b"{ not json") {
            Err(RecordError::Json(_)) => {}
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_root_is_rejected() {
        match parse_map_record(1, b"[1, 2, 3]") {
            Err(RecordError::NotAnObject) => {}
            other => panic!("expected NotAnObject, got {other:?}"),
        }
    }

    #[test]
    fn wrong_element_type_rejects_whole_record() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, "north"]],
            "vis_graph": [[]],
        }));
        match parse_map_record(1, &bytes) {
            Err(RecordError::TypeMismatch { section: "points" }) => {}
            other => panic!("expected TypeMismatch(points), got {other:?}"),
        }
    }

    #[test]
    fn short_entries_are_skipped() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0], [99], [1, 5.0, 5.0]],
            "vis_graph": [[[1, 7.07], [0]], []],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.points.len(), 2);
        assert_eq!(map.visibility_graph[0].len(), 1);
    }

    #[test]
    fn out_of_range_edges_are_dropped() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0], [1, 1.0, 0.0]],
            "vis_graph": [[[1, 1.0], [5, 2.0], [-1, 3.0]], [[0, 1.0]]],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.visibility_graph[0].len(), 1);
        assert_eq!(map.visibility_graph[0][0].target_id, 1);
    }

    #[test]
    fn point_id_mismatch_is_rejected() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0], [7, 1.0, 0.0]],
            "vis_graph": [[], []],
        }));
        match parse_map_record(1, &bytes) {
            Err(RecordError::PointIdMismatch { index: 1, found: 7 }) => {}
            other => panic!("expected PointIdMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_point_list_fails_validity() {
        let bytes = record_bytes(json!({ "points": [], "vis_graph": [] }));
        match parse_map_record(1, &bytes) {
            Err(RecordError::InvalidMap) => {}
            other => panic!("expected InvalidMap, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_seed_id_without_override_fails_validity() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
        }));
        match parse_map_record(0, &bytes) {
            Err(RecordError::InvalidMap) => {}
            other => panic!("expected InvalidMap, got {other:?}"),
        }
    }

    #[test]
    fn blocking_layers_are_decoded() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0], [1, 1.0, 0.0]],
            "vis_graph": [[[1, 1.0, [2, 3]]], [[0, 1.0]]],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.visibility_graph[0][0].blocking_layers.as_slice(), &[2, 3]);
        assert!(map.visibility_graph[1][0].blocking_layers.is_empty());
    }

    #[test]
    fn trapezoids_are_decoded() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "trapezoids": [[3, 1, 0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0]],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.trapezoids.len(), 1);
        assert_eq!(map.trapezoids[0].id, 3);
        assert_eq!(map.trapezoids[0].layer, 1);
        assert!(map.trapezoids[0].contains(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn teleporter_direction_defaults_to_one_way() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "teleports": [
                [0.0, 0.0, 0, 10.0, 10.0, 0],
                [1.0, 1.0, 0, 20.0, 20.0, 1, 1],
            ],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.teleporters[0].direction, TeleporterDirection::OneWay);
        assert_eq!(map.teleporters[1].direction, TeleporterDirection::Bidirectional);
    }

    #[test]
    fn travel_portal_connections_are_optional() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "travel_portals": [
                [1.0, 2.0],
                [3.0, 4.0, [[200, 5.0, 6.0], [300, 7.0, 8.0]]],
            ],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert!(map.travel_portals[0].connections.is_empty());
        assert_eq!(map.travel_portals[1].connections.len(), 2);
        assert_eq!(map.travel_portals[1].connections[0].dest_map_id, 200);
    }

    #[test]
    fn npc_travel_carries_five_dialog_ids() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "npc_travel": [[1.0, 2.0, 10, 11, 12, 13, 14, 500, 3.0, 4.0]],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        let npc = &map.npc_travels[0];
        assert_eq!(npc.dialog_ids, [10, 11, 12, 13, 14]);
        assert_eq!(npc.dest_map_id, 500);
        assert_eq!(npc.dest_pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn enter_travel_is_decoded() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "enter_travel": [[1.0, 2.0, 600, 3.0, 4.0]],
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.enter_travels[0].dest_map_id, 600);
    }

    #[test]
    fn stats_derive_from_sections() {
        let map = parse_map_record(42, &corridor_record()).unwrap();
        assert_eq!(map.stats.point_count, 3);
        assert_eq!(map.stats.teleport_count, 0);
    }

    #[test]
    fn explicit_stats_override_derived_counts() {
        let bytes = record_bytes(json!({
            "points": [[0, 0.0, 0.0]],
            "vis_graph": [[]],
            "stats": { "point_count": 99, "teleport_count": 5 },
        }));
        let map = parse_map_record(1, &bytes).unwrap();
        assert_eq!(map.stats.point_count, 99);
        assert_eq!(map.stats.teleport_count, 5);
        // Untouched fields keep the derived value.
        assert_eq!(map.stats.trapezoid_count, 0);
    }
}
