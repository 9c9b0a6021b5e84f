//! The public path query: anchor, search, reconstruct, decimate.

use waygraph_core::{MapData, ObstacleZone, PathNode, Vec2};

use crate::astar::{astar, closest_point_avoiding};
use crate::error::SearchError;
use crate::path::{anchor_endpoints, reconstruct, simplify, total_cost};

/// Tuning knobs for a single path query.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    /// Consult teleporters in the heuristic. The shortcut estimate is not
    /// strictly admissible, so paths may be slightly suboptimal near
    /// teleporters; disable for provably optimal results.
    pub teleporter_shortcuts: bool,
    /// Minimum spacing between returned waypoints; `<= 0` keeps every
    /// waypoint.
    pub min_spacing: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            teleporter_shortcuts: true,
            min_spacing: 0.0,
        }
    }
}

/// A finished path: waypoints with layers, and the summed Euclidean cost of
/// the returned waypoint sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct FoundPath {
    /// Waypoints from start to goal, endpoints included.
    pub nodes: Vec<PathNode>,
    /// `Σ dist(nodes[i-1], nodes[i])` over the returned nodes.
    pub total_cost: f32,
}

/// Find a path on `map` from `start` to `goal`, avoiding `obstacles`.
///
/// The query anchors both endpoints to their closest unblocked graph points,
/// runs A* over the visibility graph, re-attaches the caller's exact
/// endpoints when they sit away from the anchors, and finally applies the
/// spacing decimation from [`SearchOptions::min_spacing`].
pub fn find_path(
    map: &MapData,
    start: Vec2,
    goal: Vec2,
    obstacles: &[ObstacleZone],
    options: &SearchOptions,
) -> Result<FoundPath, SearchError> {
    let start_id = closest_point_avoiding(map, start, obstacles)?;
    let goal_id = closest_point_avoiding(map, goal, obstacles)?;

    let came_from = astar(
        map,
        start_id,
        goal_id,
        obstacles,
        options.teleporter_shortcuts,
    )
    .ok_or(SearchError::NoPath)?;

    let mut nodes =
        reconstruct(map, &came_from, start_id, goal_id).ok_or(SearchError::NoPath)?;
    anchor_endpoints(map, &mut nodes, start, goal);

    if options.min_spacing > 0.0 {
        nodes = simplify(&nodes, options.min_spacing);
    }

    let total_cost = total_cost(&nodes);
    Ok(FoundPath { nodes, total_cost })
}
