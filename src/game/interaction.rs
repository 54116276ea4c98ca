use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;
use std::collections::{BTreeMap, VecDeque};

use super::error::{GridError, Result};
use super::grid::{GridIndex, TileId};
use super::hex::OffsetCoord;
use super::pathfinding::find_path;
use super::range::{attack_range, movement_range};
use super::units::{UnitId, UnitState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    AwaitingMoveTarget,
    AwaitingAttackTarget,
    /// Entered only by committing a path, left only when it ends
    Moving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Movement,
    Attack,
    Path,
}

/// Notifications for whoever draws the grid and animates units.
/// Nothing here expects an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    ModeChanged(InteractionMode),
    SelectionChanged(Option<UnitId>),
    HighlightsChanged { kind: HighlightKind, tiles: Vec<TileId> },
    HighlightsCleared,
    /// A single path tile stops being highlighted once the unit reaches it
    HighlightCleared(TileId),
    Occupied { tile: TileId, unit: UnitId },
    Vacated { tile: TileId, unit: UnitId },
    MoveStarted { unit: UnitId, destination: TileId },
    MoveFinished { unit: UnitId },
    MoveInterrupted { unit: UnitId, tile: TileId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not waiting for a move target, or the tile is unusable
    Ignored,
    NoPath,
    /// A route exists but needs more movement than the unit has left
    OutOfRange { steps: usize },
    Committed { steps: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No move in progress
    Inactive,
    Stepped { tile: TileId, steps_left: usize },
    Arrived { tile: TileId },
    /// Next tile was taken; the unit stays where it is
    Blocked { tile: TileId },
}

#[derive(Debug, Clone)]
struct ActiveMove {
    unit: UnitId,
    steps: VecDeque<TileId>,
}

/// Selection, move/attack modes and stepwise movement for one controllable unit.
///
/// The controller owns its grid, so tile occupancy and each unit's current
/// tile only ever change together.
#[derive(Resource, Debug)]
pub struct UnitInteractionController {
    grid: GridIndex,
    units: BTreeMap<UnitId, UnitState>,
    selected: Option<UnitId>,
    mode: InteractionMode,
    highlight_kind: Option<HighlightKind>,
    highlights: Vec<TileId>,
    active: Option<ActiveMove>,
    events: Vec<InteractionEvent>,
}

impl UnitInteractionController {
    pub fn new(grid: GridIndex) -> Self {
        Self {
            grid,
            units: BTreeMap::new(),
            selected: None,
            mode: InteractionMode::Idle,
            highlight_kind: None,
            highlights: Vec::new(),
            active: None,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &UnitState)> {
        self.units.iter().map(|(&id, state)| (id, state))
    }

    pub fn highlights(&self) -> &[TileId] {
        &self.highlights
    }

    pub fn highlight_kind(&self) -> Option<HighlightKind> {
        self.highlight_kind
    }

    /// Tiles still ahead of the moving unit
    pub fn pending_steps(&self) -> Vec<TileId> {
        self.active
            .as_ref()
            .map(|m| m.steps.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put a new unit on the grid
    pub fn place_unit(&mut self, id: UnitId, coord: OffsetCoord, movement: u32, is_enemy: bool) -> Result<TileId> {
        if self.units.contains_key(&id) {
            return Err(GridError::DuplicateUnit(id));
        }
        let tile = self.grid.tile_at(coord).ok_or(GridError::UnknownTile(coord))?;
        self.grid.occupy(tile, id)?;
        self.units.insert(id, UnitState::new(tile, movement, is_enemy));
        self.events.push(InteractionEvent::Occupied { tile, unit: id });
        info!("Placed unit {} at {}", id, coord);
        Ok(tile)
    }

    /// Reset a unit's movement budget, e.g. at the start of its turn.
    /// Refused while any unit is mid-move.
    pub fn restore_movement(&mut self, id: UnitId, movement: u32) -> Result<()> {
        if self.mode == InteractionMode::Moving {
            debug!("Ignoring movement restore for {} while moving", id);
            return Err(GridError::UnitMoving(id));
        }
        let unit = self.units.get_mut(&id).ok_or(GridError::UnknownUnit(id))?;
        unit.remaining_movement = movement;
        Ok(())
    }

    /// Select a friendly unit. Enemy units, unknown ids and any request made
    /// mid-move are refused.
    pub fn select(&mut self, id: UnitId) -> bool {
        if self.mode == InteractionMode::Moving {
            debug!("Ignoring selection of {} while moving", id);
            return false;
        }
        match self.units.get(&id) {
            Some(unit) if !unit.is_enemy() => {}
            _ => return false,
        }
        if self.selected != Some(id) {
            self.clear_highlights();
            self.set_mode(InteractionMode::Idle);
            self.selected = Some(id);
            self.events.push(InteractionEvent::SelectionChanged(Some(id)));
        }
        true
    }

    /// Select whichever friendly unit stands on `coord`
    pub fn select_at(&mut self, coord: OffsetCoord) -> bool {
        match self.grid.tile_at(coord).and_then(|t| self.grid.occupant(t)) {
            Some(unit) => self.select(unit),
            None => false,
        }
    }

    pub fn enter_move_mode(&mut self) -> bool {
        let Some((unit, center, range)) = self.mode_anchor("move") else {
            return false;
        };
        self.clear_highlights();
        let tiles = movement_range(&self.grid, center, range);
        info!("Move mode for {}: {} tiles in range {}", unit, tiles.len(), range);
        self.show_highlights(HighlightKind::Movement, tiles);
        self.set_mode(InteractionMode::AwaitingMoveTarget);
        true
    }

    pub fn enter_attack_mode(&mut self) -> bool {
        let Some((unit, center, range)) = self.mode_anchor("attack") else {
            return false;
        };
        self.clear_highlights();
        let tiles = attack_range(&self.grid, center, range);
        info!("Attack mode for {}: {} tiles in range {}", unit, tiles.len(), range);
        self.show_highlights(HighlightKind::Attack, tiles);
        self.set_mode(InteractionMode::AwaitingAttackTarget);
        true
    }

    // Selected unit, its tile and its movement, if a mode toggle may proceed
    fn mode_anchor(&self, what: &str) -> Option<(UnitId, TileId, u32)> {
        if self.mode == InteractionMode::Moving {
            debug!("Ignoring {} mode request while moving", what);
            return None;
        }
        let Some(id) = self.selected else {
            debug!("Ignoring {} mode request with no unit selected", what);
            return None;
        };
        let unit = self.units.get(&id)?;
        Some((id, unit.current_tile(), unit.remaining_movement()))
    }

    /// Enemy units standing inside the current attack highlights
    pub fn attackable_units(&self) -> Vec<UnitId> {
        if self.highlight_kind != Some(HighlightKind::Attack) {
            return Vec::new();
        }
        self.highlights
            .iter()
            .filter_map(|&t| self.grid.occupant(t))
            .filter(|id| self.units.get(id).is_some_and(UnitState::is_enemy))
            .collect()
    }

    /// Handle a click on `coord`. Only acts while waiting for a move target.
    pub fn click_tile(&mut self, coord: OffsetCoord) -> ClickOutcome {
        if self.mode != InteractionMode::AwaitingMoveTarget {
            debug!("Ignoring click on {} in {:?}", coord, self.mode);
            return ClickOutcome::Ignored;
        }
        let Some(target) = self.grid.tile_at(coord) else {
            return ClickOutcome::Ignored;
        };
        if self.grid.is_occupied(target) {
            return ClickOutcome::Ignored;
        }
        let Some(id) = self.selected else {
            return ClickOutcome::Ignored;
        };
        let Some(unit) = self.units.get(&id) else {
            return ClickOutcome::Ignored;
        };

        let Some(path) = find_path(&self.grid, unit.current_tile(), target) else {
            return ClickOutcome::NoPath;
        };
        let steps = path.len();
        if steps > unit.remaining_movement() as usize {
            debug!(
                "Path to {} needs {} steps, {} has {}",
                coord,
                steps,
                id,
                unit.remaining_movement()
            );
            return ClickOutcome::OutOfRange { steps };
        }

        info!("{} moving to {} in {} steps", id, coord, steps);
        self.clear_highlights();
        self.show_highlights(HighlightKind::Path, path.clone());
        self.active = Some(ActiveMove {
            unit: id,
            steps: path.into(),
        });
        self.set_mode(InteractionMode::Moving);
        self.events.push(InteractionEvent::MoveStarted {
            unit: id,
            destination: target,
        });
        ClickOutcome::Committed { steps }
    }

    /// Take one step along the committed path. Call once per tick.
    pub fn advance(&mut self) -> StepOutcome {
        let Some(active) = self.active.as_mut() else {
            return StepOutcome::Inactive;
        };
        let unit = active.unit;
        let Some(next) = active.steps.pop_front() else {
            self.finish_move(unit);
            return StepOutcome::Inactive;
        };
        let steps_left = active.steps.len();

        let Some(from) = self.units.get(&unit).map(UnitState::current_tile) else {
            self.finish_move(unit);
            return StepOutcome::Inactive;
        };

        if let Err(err) = self.step_unit(unit, from, next) {
            warn!("{} stopped at {}: {}", unit, self.grid.coord_of(from), err);
            self.events.push(InteractionEvent::MoveInterrupted { unit, tile: from });
            self.finish_move(unit);
            return StepOutcome::Blocked { tile: from };
        }

        if steps_left == 0 {
            info!("{} arrived at {}", unit, self.grid.coord_of(next));
            self.finish_move(unit);
            StepOutcome::Arrived { tile: next }
        } else {
            StepOutcome::Stepped { tile: next, steps_left }
        }
    }

    // One atomic step: the unit leaves `from` and stands on `to`, or nothing changes.
    fn step_unit(&mut self, unit: UnitId, from: TileId, to: TileId) -> Result<()> {
        if let Some(occupant) = self.grid.occupant(to) {
            return Err(GridError::TileOccupied { tile: to, occupant });
        }
        let state = self.units.get_mut(&unit).ok_or(GridError::UnknownUnit(unit))?;
        if state.remaining_movement() == 0 {
            return Err(GridError::MovementExhausted(unit));
        }
        self.grid.vacate(from);
        self.grid.occupy(to, unit)?;
        state.spend_step();
        state.current_tile = to;

        self.events.push(InteractionEvent::Vacated { tile: from, unit });
        self.events.push(InteractionEvent::Occupied { tile: to, unit });
        self.highlights.retain(|&t| t != to);
        self.events.push(InteractionEvent::HighlightCleared(to));
        Ok(())
    }

    fn finish_move(&mut self, unit: UnitId) {
        self.active = None;
        self.clear_highlights();
        self.events.push(InteractionEvent::MoveFinished { unit });
        self.set_mode(InteractionMode::Idle);
    }

    /// Drop selection and highlights and return to Idle. Any move in progress
    /// stops on the last tile it reached; occupancy is otherwise untouched.
    pub fn reset(&mut self) {
        if let Some(active) = self.active.take() {
            warn!("Move of {} cancelled with {} steps left", active.unit, active.steps.len());
            self.events.push(InteractionEvent::MoveFinished { unit: active.unit });
        }
        self.clear_highlights();
        if self.selected.take().is_some() {
            self.events.push(InteractionEvent::SelectionChanged(None));
        }
        self.set_mode(InteractionMode::Idle);
    }

    /// Remove every unit from the grid and reset
    pub fn clear_grid(&mut self) {
        self.reset();
        for (tile, unit) in self.grid.vacate_all() {
            self.events.push(InteractionEvent::Vacated { tile, unit });
        }
        self.units.clear();
        info!("Grid cleared");
    }

    /// True when every occupied tile and every unit's current tile agree
    pub fn occupancy_consistent(&self) -> bool {
        let units_agree = self
            .units
            .iter()
            .all(|(&id, state)| self.grid.occupant(state.current_tile()) == Some(id));
        let tiles_agree = self.grid.tiles().all(|(tile, t)| match t.occupant() {
            Some(id) => self.units.get(&id).is_some_and(|u| u.current_tile() == tile),
            None => true,
        });
        units_agree && tiles_agree
    }

    fn show_highlights(&mut self, kind: HighlightKind, tiles: Vec<TileId>) {
        self.highlight_kind = Some(kind);
        self.highlights = tiles.clone();
        self.events.push(InteractionEvent::HighlightsChanged { kind, tiles });
    }

    fn clear_highlights(&mut self) {
        if self.highlight_kind.take().is_some() || !self.highlights.is_empty() {
            self.highlights.clear();
            self.events.push(InteractionEvent::HighlightsCleared);
        }
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            debug!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.events.push(InteractionEvent::ModeChanged(mode));
        }
    }
}
