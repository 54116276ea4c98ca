use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which way the hexes point; decides which stored axis carries the half-step shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HexOrientation {
    /// Columns shift vertically
    #[default]
    FlatTop,
    /// Rows shift horizontally
    PointyTop,
}

/// Which parity of the shifting axis is pushed by half a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParityRule {
    #[default]
    OddShifted,
    EvenShifted,
}

/// Largest coordinate magnitude a grid accepts. Cube components and the
/// distances between them stay inside `i32` below this.
pub const COORD_LIMIT: i32 = i32::MAX / 16;

/// Grid-storage coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub column: i32,
    pub row: i32,
}

impl OffsetCoord {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Whether both axes are within `COORD_LIMIT`
    pub fn in_bounds(self) -> bool {
        self.column.unsigned_abs() <= COORD_LIMIT as u32 && self.row.unsigned_abs() <= COORD_LIMIT as u32
    }
}

impl std::fmt::Display for OffsetCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cube coordinates (x, y, z) with x + y + z == 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The six unit steps in cube space, in the order neighbour lists are built.
pub const CUBE_DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord { x: 1, y: -1, z: 0 },
    CubeCoord { x: 1, y: 0, z: -1 },
    CubeCoord { x: 0, y: 1, z: -1 },
    CubeCoord { x: -1, y: 1, z: 0 },
    CubeCoord { x: -1, y: 0, z: 1 },
    CubeCoord { x: 0, y: -1, z: 1 },
];

impl CubeCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Build from x and z; y is derived to keep the zero sum.
    pub const fn from_xz(x: i32, z: i32) -> Self {
        Self { x, y: -x - z, z }
    }

    pub fn offset_by(self, delta: CubeCoord) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            z: self.z + delta.z,
        }
    }

    /// Hex distance, the number of single steps between two cells
    pub fn distance(self, other: CubeCoord) -> u32 {
        ((self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs())
            / 2
    }

    /// Get the 6 neighbouring cube coordinates
    pub fn neighbors(self) -> [CubeCoord; 6] {
        CUBE_DIRECTIONS.map(|d| self.offset_by(d))
    }
}

// Half-step correction for the parity axis: floor(q/2) for odd, ceil(q/2) for even.
fn parity_shift(q: i32, parity: ParityRule) -> i32 {
    match parity {
        ParityRule::OddShifted => q.div_euclid(2),
        ParityRule::EvenShifted => q.div_euclid(2) + q.rem_euclid(2),
    }
}

// (parity axis, other axis) for the given orientation
fn split_axes(coord: OffsetCoord, orientation: HexOrientation) -> (i32, i32) {
    match orientation {
        HexOrientation::FlatTop => (coord.column, coord.row),
        HexOrientation::PointyTop => (coord.row, coord.column),
    }
}

fn join_axes(q: i32, r: i32, orientation: HexOrientation) -> OffsetCoord {
    match orientation {
        HexOrientation::FlatTop => OffsetCoord::new(q, r),
        HexOrientation::PointyTop => OffsetCoord::new(r, q),
    }
}

/// Offset to cube. The parity shift never overflows; the derived `y` and `z`
/// are exact for coordinates within `COORD_LIMIT`.
pub fn offset_to_cube(coord: OffsetCoord, orientation: HexOrientation, parity: ParityRule) -> CubeCoord {
    let (q, r) = split_axes(coord, orientation);
    CubeCoord::from_xz(q, r - parity_shift(q, parity))
}

pub fn cube_to_offset(cube: CubeCoord, orientation: HexOrientation, parity: ParityRule) -> OffsetCoord {
    join_axes(cube.x, cube.z + parity_shift(cube.x, parity), orientation)
}

/// Distance between tile centres in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for TileSpacing {
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 0.866,
        }
    }
}

fn is_shifted(q: i32, parity: ParityRule) -> bool {
    let odd = q.rem_euclid(2) == 1;
    match parity {
        ParityRule::OddShifted => odd,
        ParityRule::EvenShifted => !odd,
    }
}

/// World-space centre of a tile. Rows grow downward; shifted columns (flat
/// top) drop by half a row, shifted rows (pointy top) move right by half a column.
pub fn tile_world_position(
    coord: OffsetCoord,
    orientation: HexOrientation,
    parity: ParityRule,
    spacing: TileSpacing,
) -> Vec2 {
    let x = coord.column as f32 * spacing.horizontal;
    let y = -(coord.row as f32) * spacing.vertical;

    match orientation {
        HexOrientation::FlatTop if is_shifted(coord.column, parity) => {
            Vec2::new(x, y - spacing.vertical * 0.5)
        }
        HexOrientation::PointyTop if is_shifted(coord.row, parity) => {
            Vec2::new(x + spacing.horizontal * 0.5, y)
        }
        _ => Vec2::new(x, y),
    }
}
