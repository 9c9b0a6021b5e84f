//! Anchor-point selection and the A* core.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use waygraph_core::geometry::any_zone_contains;
use waygraph_core::{MapData, ObstacleZone, Vec2};

use crate::error::SearchError;
use crate::heuristic;

/// Id of the graph point closest to `pos` (squared-distance ordering).
///
/// Fails with [`SearchError::NoAnchorPoint`] when the map has no points.
pub fn closest_point(map: &MapData, pos: Vec2) -> Result<i32, SearchError> {
    closest_point_avoiding(map, pos, &[])
}

/// Id of the closest graph point to `pos` that no obstacle zone contains.
///
/// Fails with [`SearchError::NoAnchorPoint`] when the map has no points or
/// every point is blocked.
pub fn closest_point_avoiding(
    map: &MapData,
    pos: Vec2,
    obstacles: &[ObstacleZone],
) -> Result<i32, SearchError> {
    let mut best: Option<(f32, i32)> = None;
    for point in &map.points {
        if any_zone_contains(obstacles, point.pos) {
            continue;
        }
        let sq_dist = pos.sq_dist(point.pos);
        if best.map_or(true, |(d, _)| sq_dist < d) {
            best = Some((sq_dist, point.id));
        }
    }
    best.map(|(_, id)| id).ok_or(SearchError::NoAnchorPoint)
}

/// An open-set entry ordered by estimated total cost.
///
/// `BinaryHeap` is a max-heap, so entries are compared *reversed* to pop the
/// lowest `f` first. `f32::total_cmp` gives the total order `Ord` needs.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f32,
    id: i32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Run A* from `start_id` to `goal_id`, skipping points inside `obstacles`.
///
/// Returns the predecessor table on success (`came_from[start] == start`),
/// `None` when the goal is unreachable. There is no closed set: a stale heap
/// entry is harmless because relaxation only fires on a strict improvement,
/// and every edge target is bounds-checked before use.
pub(crate) fn astar(
    map: &MapData,
    start_id: i32,
    goal_id: i32,
    obstacles: &[ObstacleZone],
    teleporter_shortcuts: bool,
) -> Option<Vec<i32>> {
    let point_count = map.points.len();
    if start_id < 0
        || start_id as usize >= point_count
        || goal_id < 0
        || goal_id as usize >= point_count
    {
        return None;
    }

    let goal_pos = map.points[goal_id as usize].pos;

    let mut cost_so_far = vec![f32::INFINITY; point_count];
    let mut came_from = vec![-1i32; point_count];
    let mut open = BinaryHeap::new();

    cost_so_far[start_id as usize] = 0.0;
    came_from[start_id as usize] = start_id;
    open.push(OpenEntry {
        f: 0.0,
        id: start_id,
    });

    while let Some(OpenEntry { id: current, .. }) = open.pop() {
        if current == goal_id {
            return Some(came_from);
        }

        // Contained nodes cannot relax anything. Unreachable when the anchors
        // were validated, but a stale entry may still surface one.
        let current_pos = map.points[current as usize].pos;
        if any_zone_contains(obstacles, current_pos) {
            continue;
        }

        let edges = match map.visibility_graph.get(current as usize) {
            Some(edges) => edges,
            None => continue,
        };

        for edge in edges {
            let neighbour = edge.target_id;
            if neighbour < 0 || neighbour as usize >= point_count {
                continue;
            }
            let neighbour_pos = map.points[neighbour as usize].pos;
            if any_zone_contains(obstacles, neighbour_pos) {
                continue;
            }

            let new_cost = cost_so_far[current as usize] + edge.distance;
            if new_cost < cost_so_far[neighbour as usize] {
                cost_so_far[neighbour as usize] = new_cost;
                came_from[neighbour as usize] = current;
                let f = new_cost
                    + heuristic::estimate(map, neighbour_pos, goal_pos, teleporter_shortcuts);
                open.push(OpenEntry { f, id: neighbour });
            }
        }
    }

    None
}
