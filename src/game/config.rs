use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::Result;
use super::grid::GridIndex;
use super::hex::{HexOrientation, OffsetCoord, ParityRule, TileSpacing};

fn default_movement_cost() -> u32 {
    1
}

/// One tile of a grid description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub column: i32,
    pub row: i32,
    #[serde(default = "default_movement_cost")]
    pub movement_cost: u32,
}

impl TileSpec {
    pub fn new(column: i32, row: i32) -> Self {
        Self::with_cost(column, row, default_movement_cost())
    }

    pub fn with_cost(column: i32, row: i32, movement_cost: u32) -> Self {
        Self {
            column,
            row,
            movement_cost,
        }
    }

    pub fn coord(&self) -> OffsetCoord {
        OffsetCoord::new(self.column, self.row)
    }
}

impl From<(i32, i32, u32)> for TileSpec {
    fn from((column, row, movement_cost): (i32, i32, u32)) -> Self {
        Self::with_cost(column, row, movement_cost)
    }
}

/// Rectangular grid settings
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: i32,
    pub rows: i32,
    pub orientation: HexOrientation,
    pub parity: ParityRule,
    pub spacing: TileSpacing,
    /// Movement points a freshly placed unit starts with
    pub unit_movement: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 11,
            rows: 9,
            orientation: HexOrientation::FlatTop,
            parity: ParityRule::OddShifted,
            spacing: TileSpacing::default(),
            unit_movement: 3,
        }
    }
}

impl GridConfig {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn build_grid(&self) -> Result<GridIndex> {
        GridIndex::rectangle(self.columns, self.rows, self.orientation, self.parity)
    }
}

/// Arbitrary, possibly irregular, set of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    #[serde(default)]
    pub orientation: HexOrientation,
    #[serde(default)]
    pub parity: ParityRule,
    pub tiles: Vec<TileSpec>,
}

impl GridLayout {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn build_grid(&self) -> Result<GridIndex> {
        GridIndex::new(self.tiles.iter().copied(), self.orientation, self.parity)
    }
}
