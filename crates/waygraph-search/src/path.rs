//! Path reconstruction, endpoint anchoring, decimation, and cost.

use waygraph_core::{MapData, PathNode, Vec2};

/// Endpoints farther than this (squared) from their anchor point are
/// prepended/appended as explicit waypoints.
const ANCHOR_SQ_DIST: f32 = 1.0;

/// Walk the predecessor table from `goal_id` back to `start_id`.
///
/// Bounded at `2 * |points|` steps so a corrupt table cannot loop forever.
/// Returns `None` unless the walk actually reaches the start.
pub(crate) fn reconstruct(
    map: &MapData,
    came_from: &[i32],
    start_id: i32,
    goal_id: i32,
) -> Option<Vec<PathNode>> {
    let max_steps = map.points.len() * 2;
    let mut nodes = Vec::new();
    let mut current = goal_id;
    let mut steps = 0;

    while current != start_id && steps < max_steps {
        let point = map.points.get(current as usize)?;
        nodes.push(PathNode {
            pos: point.pos,
            layer: point.layer,
        });
        current = *came_from.get(current as usize)?;
        steps += 1;
    }

    if current != start_id {
        return None;
    }
    let start = map.points.get(start_id as usize)?;
    nodes.push(PathNode {
        pos: start.pos,
        layer: start.layer,
    });
    nodes.reverse();
    Some(nodes)
}

/// Prepend/append the caller's exact endpoints when they sit away from the
/// anchor points.
///
/// The inserted waypoint takes the layer of the trapezoid containing it,
/// falling back to the adjacent graph point's layer when no trapezoid
/// matches.
pub(crate) fn anchor_endpoints(map: &MapData, nodes: &mut Vec<PathNode>, start: Vec2, goal: Vec2) {
    if let Some(first) = nodes.first().copied() {
        if start.sq_dist(first.pos) > ANCHOR_SQ_DIST {
            let layer = map
                .trapezoid_containing(start)
                .map_or(first.layer, |t| t.layer);
            nodes.insert(0, PathNode { pos: start, layer });
        }
    }
    if let Some(last) = nodes.last().copied() {
        if goal.sq_dist(last.pos) > ANCHOR_SQ_DIST {
            let layer = map
                .trapezoid_containing(goal)
                .map_or(last.layer, |t| t.layer);
            nodes.push(PathNode { pos: goal, layer });
        }
    }
}

/// Decimate `path` to waypoints at least `min_spacing` apart.
///
/// The first and last waypoints always survive, and so does every layer
/// change — bridges and ramps must stay visible however coarse the spacing.
/// Returns the path unchanged when `min_spacing <= 0` or there is nothing to
/// drop.
pub fn simplify(path: &[PathNode], min_spacing: f32) -> Vec<PathNode> {
    if path.len() <= 2 || min_spacing <= 0.0 {
        return path.to_vec();
    }

    let mut kept = Vec::with_capacity(path.len());
    kept.push(path[0]);
    let mut last = path[0];

    for node in &path[1..path.len() - 1] {
        if last.pos.dist(node.pos) >= min_spacing || node.layer != last.layer {
            kept.push(*node);
            last = *node;
        }
    }

    kept.push(path[path.len() - 1]);
    kept
}

/// Sum of Euclidean distances between consecutive waypoints.
pub fn total_cost(path: &[PathNode]) -> f32 {
    path.windows(2).map(|pair| pair[0].pos.dist(pair[1].pos)).sum()
}
