//! One side's grid: where its ships are and which cells have been shot.

use core::fmt;
use log::debug;

use crate::bitboard::Layer;
use crate::common::{CellState, Orientation, PlacementError, ShotResult};
use crate::config::BOARD_SIZE;
use crate::coordinate::Coordinate;
use crate::render::{format_grid, render_own_board};

/// Grid of cell states for one side.
///
/// Ship cells, hits and misses are kept as separate layers. Hits are always
/// a subset of ship cells and misses never overlap them, so every cell maps
/// to exactly one [`CellState`].
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    ships: Layer,
    hits: Layer,
    misses: Layer,
}

impl Board {
    /// Board with every cell empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, at: Coordinate) -> CellState {
        if self.hits.contains(at) {
            CellState::Hit
        } else if self.misses.contains(at) {
            CellState::Miss
        } else if self.ships.contains(at) {
            CellState::Ship
        } else {
            CellState::Empty
        }
    }

    /// Every cell with its state, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        Coordinate::all().map(move |at| (at, self.cell(at)))
    }

    /// Cells that held a ship at placement time, hit or not.
    pub fn ship_cells(&self) -> usize {
        self.ships.count_ones()
    }

    /// Ship cells not yet hit.
    pub fn remaining_ship_cells(&self) -> usize {
        (self.ships & !self.hits).count_ones()
    }

    pub fn shots_taken(&self) -> usize {
        (self.hits | self.misses).count_ones()
    }

    pub fn hits(&self) -> Layer {
        self.hits
    }

    pub fn misses(&self) -> Layer {
        self.misses
    }

    /// Cells that are neither hit nor missed.
    pub fn unshot_cells(&self) -> impl Iterator<Item = Coordinate> {
        (!(self.hits | self.misses)).coordinates()
    }

    /// Whether a ship of `length` fits at `origin` over empty cells only.
    pub fn can_place(&self, origin: Coordinate, length: usize, orientation: Orientation) -> bool {
        match ship_run(origin, length, orientation) {
            Ok(run) => (self.occupied() & run).is_empty(),
            Err(_) => false,
        }
    }

    /// Mark a straight run of cells as ship.
    pub fn place_ship(
        &mut self,
        origin: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let run = ship_run(origin, length, orientation)?;
        if let Some(at) = (self.occupied() & run).coordinates().next() {
            return Err(PlacementError::Overlap { at });
        }
        self.ships |= run;
        debug!("placed {:?} ship of length {} at {}", orientation, length, origin);
        Ok(())
    }

    /// Fire at a cell. Cells shot before are left untouched.
    pub fn resolve_shot(&mut self, at: Coordinate) -> ShotResult {
        match self.cell(at) {
            CellState::Ship => {
                self.hits.insert(at);
                ShotResult::Hit
            }
            CellState::Empty => {
                self.misses.insert(at);
                ShotResult::Miss
            }
            CellState::Hit | CellState::Miss => ShotResult::AlreadyShot,
        }
    }

    /// `true` when no cell is in the [`CellState::Ship`] state.
    pub fn is_fleet_destroyed(&self) -> bool {
        (self.ships & !self.hits).is_empty()
    }

    fn occupied(&self) -> Layer {
        self.ships | self.hits | self.misses
    }
}

/// Apply a shot to `board`; see [`Board::resolve_shot`].
pub fn resolve_shot(board: &mut Board, at: Coordinate) -> ShotResult {
    board.resolve_shot(at)
}

/// `true` once every ship cell on `board` has been hit.
pub fn is_fleet_destroyed(board: &Board) -> bool {
    board.is_fleet_destroyed()
}

fn ship_run(
    origin: Coordinate,
    length: usize,
    orientation: Orientation,
) -> Result<Layer, PlacementError> {
    if length == 0 || length > BOARD_SIZE {
        return Err(PlacementError::InvalidLength { length });
    }
    let mut run = Layer::new();
    for step in 0..length {
        let at = origin
            .step(orientation, step)
            .ok_or(PlacementError::OutOfBounds {
                origin,
                length,
                orientation,
            })?;
        run.insert(at);
    }
    Ok(run)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grid(&render_own_board(self)))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ ships: {}, hits: {}, misses: {} }}",
            self.ship_cells(),
            self.hits.count_ones(),
            self.misses.count_ones()
        )?;
        write!(f, "{}", self)
    }
}
