//! The parsed map data model and its structural invariants.
//!
//! A [`MapData`] is produced once by the record parser, published to the
//! engine's map registry, and never mutated afterwards — concurrent searches
//! read it lock-free.

use smallvec::SmallVec;

use crate::geometry::{Trapezoid, Vec2};

/// A navigation node inside a map.
///
/// `id` always equals the point's index in [`MapData::points`]; the parser
/// rejects records that violate this, and the search exploits it throughout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Index of this point in the map's point list.
    pub id: i32,
    /// World position.
    pub pos: Vec2,
    /// Vertical layer (0 = ground, positive = elevated).
    pub layer: i32,
}

/// A directed line-of-sight edge in the visibility graph.
///
/// The off-line pipeline emits a symmetric graph (both endpoints carry a
/// matching edge), but nothing here relies on that.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEdge {
    /// Index of the target point.
    pub target_id: i32,
    /// Precomputed travel distance to the target.
    pub distance: f32,
    /// Layers that would block this edge. Stored for future layer-masked
    /// traversal; the search does not filter on it yet.
    pub blocking_layers: SmallVec<[u32; 4]>,
}

impl VisibilityEdge {
    /// Create an edge with no blocking layers.
    pub fn new(target_id: i32, distance: f32) -> Self {
        Self {
            target_id,
            distance,
            blocking_layers: SmallVec::new(),
        }
    }
}

/// Traversal direction of a teleporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeleporterDirection {
    /// Enter side leads to exit side only.
    OneWay,
    /// Either side leads to the other.
    Bidirectional,
}

impl TeleporterDirection {
    /// Decode the record encoding: `1` is bidirectional, anything else one-way.
    pub fn from_record(raw: i32) -> Self {
        if raw == 1 {
            Self::Bidirectional
        } else {
            Self::OneWay
        }
    }
}

/// A point-pair shortcut inside one map.
///
/// Teleporters are consulted only by the search heuristic; the visibility
/// graph carries no corresponding edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Teleporter {
    /// Entry pad position.
    pub enter: Vec2,
    /// Layer of the entry pad (stored, unused by search).
    pub enter_layer: i32,
    /// Exit pad position.
    pub exit: Vec2,
    /// Layer of the exit pad (stored, unused by search).
    pub exit_layer: i32,
    /// Whether the pair works in both directions.
    pub direction: TeleporterDirection,
}

/// One destination reachable through a [`TravelPortal`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalConnection {
    /// Map the portal leads to.
    pub dest_map_id: i32,
    /// Arrival position on the destination map.
    pub dest_pos: Vec2,
}

/// An inter-map portal. Opaque metadata for the current search.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelPortal {
    /// Portal position on this map.
    pub position: Vec2,
    /// Possible destinations.
    pub connections: Vec<PortalConnection>,
}

/// An NPC-mediated inter-map transition. Opaque metadata for the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NpcTravel {
    /// Position of the NPC offering the travel.
    pub npc_pos: Vec2,
    /// Dialog choices selecting the travel, in order.
    pub dialog_ids: [i32; 5],
    /// Map the travel leads to.
    pub dest_map_id: i32,
    /// Arrival position on the destination map.
    pub dest_pos: Vec2,
}

/// An interact-to-enter inter-map transition. Opaque metadata for the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnterTravel {
    /// Position of the entrance on this map.
    pub enter_pos: Vec2,
    /// Map the entrance leads to.
    pub dest_map_id: i32,
    /// Arrival position on the destination map.
    pub dest_pos: Vec2,
}

/// Per-map entity counts, surfaced through the host API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapStatistics {
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
}

/// A fully parsed map: points, visibility graph, walkable regions, and
/// inter-map metadata.
///
/// Immutable after publication. Row `i` of `visibility_graph` lists the edges
/// leaving point `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapData {
    /// Identifier of this map (positive for valid maps).
    pub map_id: i32,
    /// Navigation points, indexed by their own `id`.
    pub points: Vec<Point>,
    /// Adjacency rows, one per point.
    pub visibility_graph: Vec<Vec<VisibilityEdge>>,
    /// Walkable quads used for layer lookup.
    pub trapezoids: Vec<Trapezoid>,
    /// Heuristic shortcuts.
    pub teleporters: Vec<Teleporter>,
    /// Inter-map portals (metadata only).
    pub travel_portals: Vec<TravelPortal>,
    /// NPC travels (metadata only).
    pub npc_travels: Vec<NpcTravel>,
    /// Enter travels (metadata only).
    pub enter_travels: Vec<EnterTravel>,
    /// Entity counts; record-supplied counts override derived ones.
    pub stats: MapStatistics,
}

impl MapData {
    /// Whether this map satisfies the structural invariants required by the
    /// search: a positive id, at least one point, and one adjacency row per
    /// point.
    pub fn is_valid(&self) -> bool {
        self.map_id > 0
            && !self.points.is_empty()
            && !self.visibility_graph.is_empty()
            && self.points.len() == self.visibility_graph.len()
    }

    /// First trapezoid containing `pos`, if any.
    ///
    /// Used to assign a layer to caller-supplied world positions that are not
    /// graph points.
    pub fn trapezoid_containing(&self, pos: Vec2) -> Option<&Trapezoid> {
        self.trapezoids.iter().find(|t| t.contains(pos))
    }

    /// Entity counts derived from the parsed vectors.
    ///
    /// The record's own `stats` object, when present, overrides these
    /// field-by-field.
    pub fn derived_stats(&self) -> MapStatistics {
        MapStatistics {
            trapezoid_count: self.trapezoids.len() as i32,
            point_count: self.points.len() as i32,
            teleport_count: self.teleporters.len() as i32,
            travel_portal_count: self.travel_portals.len() as i32,
            npc_travel_count: self.npc_travels.len() as i32,
            enter_travel_count: self.enter_travels.len() as i32,
        }
    }
}

/// One waypoint of a finished path: a position plus the layer it sits on.
///
/// The layer survives path simplification so layer changes (bridges, ramps)
/// remain visible to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    /// World position of the waypoint.
    pub pos: Vec2,
    /// Layer of the waypoint.
    pub layer: i32,
}
