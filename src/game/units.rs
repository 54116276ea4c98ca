use super::grid::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit's position and movement budget. Only the interaction controller
/// writes these; everyone else reads them through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitState {
    pub(crate) current_tile: TileId,
    pub(crate) remaining_movement: u32,
    is_enemy: bool,
}

impl UnitState {
    pub(crate) fn new(current_tile: TileId, remaining_movement: u32, is_enemy: bool) -> Self {
        Self {
            current_tile,
            remaining_movement,
            is_enemy,
        }
    }

    pub fn current_tile(&self) -> TileId {
        self.current_tile
    }

    pub fn remaining_movement(&self) -> u32 {
        self.remaining_movement
    }

    pub fn is_enemy(&self) -> bool {
        self.is_enemy
    }

    /// Spend one movement point. Returns false when the budget was already empty.
    pub(crate) fn spend_step(&mut self) -> bool {
        match self.remaining_movement.checked_sub(1) {
            Some(left) => {
                self.remaining_movement = left;
                true
            }
            None => false,
        }
    }
}
