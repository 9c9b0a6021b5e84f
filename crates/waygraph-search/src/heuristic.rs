//! A* cost-to-go estimates, with optional teleporter shortcuts.
//!
//! The teleporter-aware estimate is an optimistic lower bound that routes
//! through the pair of teleporters nearest to each endpoint, even though the
//! graph carries no teleporter edges. It can undercut *or* overshoot the true
//! remaining cost (overshoot when the shortcut is longer than the walkable
//! route), so it trades strict admissibility for biasing the search toward
//! teleporter corridors. Callers that need provably optimal paths disable it
//! via [`SearchOptions::teleporter_shortcuts`](crate::SearchOptions).

use waygraph_core::{MapData, TeleporterDirection, Vec2};

/// Estimated remaining cost from `from` to `to` on `map`.
pub(crate) fn estimate(map: &MapData, from: Vec2, to: Vec2, teleporter_shortcuts: bool) -> f32 {
    let direct = from.dist(to);
    if !teleporter_shortcuts || map.teleporters.is_empty() {
        return direct;
    }
    direct.min(teleporter_shortcut(map, from, to))
}

/// Cost of the best route that enters the teleporter network near `from` and
/// leaves it near `to`.
fn teleporter_shortcut(map: &MapData, from: Vec2, to: Vec2) -> f32 {
    let mut near_start: Option<(f32, usize)> = None;
    let mut near_goal: Option<(f32, usize)> = None;

    for (index, tp) in map.teleporters.iter().enumerate() {
        // Start side: the enter pad, or either pad when bidirectional.
        let mut start_dist = from.dist(tp.enter);
        if tp.direction == TeleporterDirection::Bidirectional {
            start_dist = start_dist.min(from.dist(tp.exit));
        }
        if near_start.map_or(true, |(d, _)| start_dist < d) {
            near_start = Some((start_dist, index));
        }

        // Goal side: the exit pad, or either pad when bidirectional.
        let mut goal_dist = to.dist(tp.exit);
        if tp.direction == TeleporterDirection::Bidirectional {
            goal_dist = goal_dist.min(to.dist(tp.enter));
        }
        if near_goal.map_or(true, |(d, _)| goal_dist < d) {
            near_goal = Some((goal_dist, index));
        }
    }

    let ((start_dist, start_index), (goal_dist, goal_index)) = match (near_start, near_goal) {
        (Some(s), Some(g)) => (s, g),
        _ => return f32::INFINITY,
    };

    let start_tp = &map.teleporters[start_index];
    if start_index == goal_index {
        return start_dist + start_tp.exit.dist(to);
    }
    let goal_tp = &map.teleporters[goal_index];
    start_dist + start_tp.exit.dist(goal_tp.exit) + goal_dist
}
