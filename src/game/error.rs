use super::grid::TileId;
use super::hex::OffsetCoord;
use super::units::UnitId;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("duplicate tile at {0}")]
    DuplicateTile(OffsetCoord),

    #[error("tile {0} is outside the supported coordinate range")]
    CoordinateOutOfRange(OffsetCoord),

    #[error("tile {coord} has movement cost {cost}, must be at least 1")]
    InvalidMovementCost { coord: OffsetCoord, cost: u32 },

    #[error("no tile at {0}")]
    UnknownTile(OffsetCoord),

    #[error("tile {tile:?} is already occupied by unit {occupant}")]
    TileOccupied { tile: TileId, occupant: UnitId },

    #[error("unit {0} is already on the grid")]
    DuplicateUnit(UnitId),

    #[error("unit {0} has no movement left")]
    MovementExhausted(UnitId),

    #[error("unit {0} is mid-move")]
    UnitMoving(UnitId),

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("failed to read grid config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse grid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub type Result<T> = std::result::Result<T, GridError>;
