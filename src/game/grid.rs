use bevy::log::{debug, info};
use std::collections::HashMap;

use super::config::TileSpec;
use super::error::{GridError, Result};
use super::hex::{cube_to_offset, offset_to_cube, CubeCoord, HexOrientation, OffsetCoord, ParityRule};
use super::units::UnitId;

/// Index of a tile inside its grid. Only valid for the grid that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

#[derive(Debug, Clone)]
pub struct Tile {
    coord: OffsetCoord,
    movement_cost: u32,
    occupant: Option<UnitId>,
    neighbors: Vec<TileId>,
}

impl Tile {
    pub fn coord(&self) -> OffsetCoord {
        self.coord
    }

    pub fn movement_cost(&self) -> u32 {
        self.movement_cost
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Present tiles one step away, in `CUBE_DIRECTIONS` order
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }
}

/// Owns every tile of one grid and is the only thing that changes occupancy.
#[derive(Debug, Clone)]
pub struct GridIndex {
    orientation: HexOrientation,
    parity: ParityRule,
    tiles: Vec<Tile>,
    lookup: HashMap<OffsetCoord, TileId>,
}

impl GridIndex {
    pub fn new(
        specs: impl IntoIterator<Item = TileSpec>,
        orientation: HexOrientation,
        parity: ParityRule,
    ) -> Result<Self> {
        let mut tiles = Vec::new();
        let mut lookup = HashMap::new();

        for spec in specs {
            let coord = spec.coord();
            if !coord.in_bounds() {
                return Err(GridError::CoordinateOutOfRange(coord));
            }
            if spec.movement_cost == 0 {
                return Err(GridError::InvalidMovementCost {
                    coord,
                    cost: spec.movement_cost,
                });
            }
            if lookup.insert(coord, TileId(tiles.len())).is_some() {
                return Err(GridError::DuplicateTile(coord));
            }
            tiles.push(Tile {
                coord,
                movement_cost: spec.movement_cost,
                occupant: None,
                neighbors: Vec::new(),
            });
        }

        let mut grid = Self {
            orientation,
            parity,
            tiles,
            lookup,
        };
        grid.rebuild_neighbors();

        info!(
            "Built hex grid with {} tiles ({:?}, {:?})",
            grid.tiles.len(),
            orientation,
            parity
        );
        Ok(grid)
    }

    /// Full `columns` x `rows` rectangle with uniform cost 1
    pub fn rectangle(columns: i32, rows: i32, orientation: HexOrientation, parity: ParityRule) -> Result<Self> {
        let specs = (0..rows).flat_map(|row| (0..columns).map(move |column| TileSpec::new(column, row)));
        Self::new(specs, orientation, parity)
    }

    fn rebuild_neighbors(&mut self) {
        for index in 0..self.tiles.len() {
            let cube = self.cube_of(TileId(index));
            let neighbors: Vec<TileId> = cube
                .neighbors()
                .into_iter()
                .filter_map(|n| self.tile_at_cube(n))
                .collect();
            self.tiles[index].neighbors = neighbors;
        }
        debug!("Neighbour cache rebuilt for {} tiles", self.tiles.len());
    }

    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    pub fn parity(&self) -> ParityRule {
        self.parity
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_at(&self, coord: OffsetCoord) -> Option<TileId> {
        self.lookup.get(&coord).copied()
    }

    pub fn tile_at_cube(&self, cube: CubeCoord) -> Option<TileId> {
        self.tile_at(cube_to_offset(cube, self.orientation, self.parity))
    }

    /// Panics if `id` did not come from this grid.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    pub fn coord_of(&self, id: TileId) -> OffsetCoord {
        self.tile(id).coord
    }

    pub fn cube_of(&self, id: TileId) -> CubeCoord {
        offset_to_cube(self.tile(id).coord, self.orientation, self.parity)
    }

    pub fn distance(&self, a: TileId, b: TileId) -> u32 {
        self.cube_of(a).distance(self.cube_of(b))
    }

    pub fn occupant(&self, id: TileId) -> Option<UnitId> {
        self.tile(id).occupant
    }

    pub fn is_occupied(&self, id: TileId) -> bool {
        self.tile(id).is_occupied()
    }

    /// Put `unit` on `id`. An occupied tile is refused, even by the same unit.
    pub fn occupy(&mut self, id: TileId, unit: UnitId) -> Result<()> {
        let tile = &mut self.tiles[id.0];
        if let Some(occupant) = tile.occupant {
            return Err(GridError::TileOccupied { tile: id, occupant });
        }
        tile.occupant = Some(unit);
        Ok(())
    }

    /// Clear `id`, returning whoever stood there
    pub fn vacate(&mut self, id: TileId) -> Option<UnitId> {
        self.tiles[id.0].occupant.take()
    }

    pub(crate) fn vacate_all(&mut self) -> Vec<(TileId, UnitId)> {
        self.tiles
            .iter_mut()
            .enumerate()
            .filter_map(|(i, t)| t.occupant.take().map(|unit| (TileId(i), unit)))
            .collect()
    }
}
