//! Distance-disk range queries.
//!
//! These only look at hex distance: occupancy, movement cost and whether a
//! route actually exists are all ignored, so a highlighted tile may still be
//! unreachable when blockers cut it off.

use super::grid::{GridIndex, TileId};
use super::hex::CubeCoord;

/// Every tile within `range` steps of `center`, excluding `center` itself.
///
/// Order is deterministic: cube x offset ascending, then y offset ascending.
/// A disk at least as large as the grid is answered by scanning the tiles, so
/// the cost is bounded by the grid size whatever `range` is.
pub fn tiles_within_range(grid: &GridIndex, center: TileId, range: u32) -> Vec<TileId> {
    if disk_size(range) >= grid.len() {
        disk_scan(grid, center, range)
    } else {
        disk_walk(grid, center, range)
    }
}

// Visit every cell of the disk and keep the ones present in the grid
fn disk_walk(grid: &GridIndex, center: TileId, range: u32) -> Vec<TileId> {
    let origin = grid.cube_of(center);
    let range = i32::try_from(range).unwrap_or(i32::MAX);
    let mut result = Vec::new();

    for dx in -range..=range {
        for dy in (-range).max(-dx - range)..=range.min(-dx + range) {
            let delta = CubeCoord { x: dx, y: dy, z: -dx - dy };
            if let Some(tile) = grid.tile_at_cube(origin.offset_by(delta)) {
                if tile != center {
                    result.push(tile);
                }
            }
        }
    }

    result
}

// Filter every grid tile by distance, then order like `disk_walk`
fn disk_scan(grid: &GridIndex, center: TileId, range: u32) -> Vec<TileId> {
    let origin = grid.cube_of(center);
    let mut found: Vec<((i32, i32), TileId)> = grid
        .tiles()
        .filter(|&(id, _)| id != center && grid.distance(center, id) <= range)
        .map(|(id, _)| {
            let cube = grid.cube_of(id);
            ((cube.x - origin.x, cube.y - origin.y), id)
        })
        .collect();
    found.sort_unstable_by_key(|&(delta, _)| delta);
    found.into_iter().map(|(_, id)| id).collect()
}

/// Movement highlight set
pub fn movement_range(grid: &GridIndex, center: TileId, range: u32) -> Vec<TileId> {
    tiles_within_range(grid, center, range)
}

/// Attack highlight set. Same disk as movement; only the caller's intent differs.
pub fn attack_range(grid: &GridIndex, center: TileId, range: u32) -> Vec<TileId> {
    tiles_within_range(grid, center, range)
}

/// Number of cells in a radius-`range` disk minus its centre, on an unbounded grid
/// (saturating at `usize::MAX`)
pub fn disk_size(range: u32) -> usize {
    let r = usize::try_from(range).unwrap_or(usize::MAX);
    r.saturating_mul(r.saturating_add(1)).saturating_mul(3)
}
