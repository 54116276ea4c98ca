use bevy::log::debug;
use std::collections::HashMap;

use super::grid::{GridIndex, TileId};
use super::priority_queue::PriorityQueue;

/// A* from `start` to `goal` over the neighbour cache.
///
/// Entering a tile costs that tile's movement cost. Occupied tiles block,
/// except the goal itself. The returned steps exclude `start` and end on
/// `goal`; `None` means the goal was never reached (or `start == goal`).
/// Costs accumulate as saturating `u64`, so any `u32` tile cost is safe.
pub fn find_path(grid: &GridIndex, start: TileId, goal: TileId) -> Option<Vec<TileId>> {
    if start == goal {
        return None;
    }

    let mut frontier = PriorityQueue::new();
    let mut came_from: HashMap<TileId, TileId> = HashMap::new();
    let mut cost_so_far: HashMap<TileId, u64> = HashMap::new();
    let goal_cube = grid.cube_of(goal);

    cost_so_far.insert(start, 0);
    frontier.push(start, 0);

    while let Some(current) = frontier.pop() {
        if current == goal {
            break;
        }
        let current_cost = cost_so_far[&current];

        for &next in grid.tile(current).neighbors() {
            let tile = grid.tile(next);
            if tile.is_occupied() && next != goal {
                continue;
            }

            let new_cost = current_cost.saturating_add(u64::from(tile.movement_cost()));
            if cost_so_far.get(&next).is_none_or(|&old| new_cost < old) {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                let priority = new_cost.saturating_add(u64::from(grid.cube_of(next).distance(goal_cube)));
                frontier.push(next, i64::try_from(priority).unwrap_or(i64::MAX));
            }
        }
    }

    if !came_from.contains_key(&goal) {
        debug!(
            "No path from {} to {}",
            grid.coord_of(start),
            grid.coord_of(goal)
        );
        return None;
    }

    let mut path = Vec::new();
    let mut node = goal;
    while node != start {
        path.push(node);
        node = came_from[&node];
    }
    path.reverse();
    Some(path)
}

/// Sum of entry costs along `path`
pub fn path_cost(grid: &GridIndex, path: &[TileId]) -> u64 {
    path.iter()
        .map(|&t| u64::from(grid.tile(t).movement_cost()))
        .fold(0, u64::saturating_add)
}
