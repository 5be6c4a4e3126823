//! Types shared across the engine: cell states, shot results, sides and
//! placement errors.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
}

impl CellState {
    /// Symbol used when drawing the board.
    pub const fn symbol(self) -> char {
        match self {
            CellState::Empty => '~',
            CellState::Ship => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
        }
    }

    /// `true` once the cell has received a shot.
    pub const fn is_shot(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// Result of firing at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    /// A ship cell was struck.
    Hit,
    /// The cell was open water.
    Miss,
    /// The cell had been fired at before; nothing changed.
    AlreadyShot,
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotResult::Hit => write!(f, "hit"),
            ShotResult::Miss => write!(f, "miss"),
            ShotResult::AlreadyShot => write!(f, "already shot"),
        }
    }
}

/// Direction a ship extends from its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along a row, towards higher column numbers.
    Horizontal,
    /// Along a column, towards later row letters.
    Vertical,
}

/// One of the two parties in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Opponent,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Errors raised while validating a fleet or putting ships on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// A fleet must contain at least one ship.
    EmptyFleet,
    /// Ship length is zero or longer than the board.
    InvalidLength { length: usize },
    /// The fleet would cover too much of the board.
    FleetTooDense { cells: usize, limit: usize },
    /// The run starting at `origin` leaves the board.
    OutOfBounds {
        origin: Coordinate,
        length: usize,
        orientation: Orientation,
    },
    /// The run covers a cell that is not empty.
    Overlap { at: Coordinate },
    /// Random placement found no free run within the attempt limit.
    Stalled { length: usize, attempts: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::EmptyFleet => write!(f, "fleet contains no ships"),
            PlacementError::InvalidLength { length } => {
                write!(f, "ship length {} does not fit the board", length)
            }
            PlacementError::FleetTooDense { cells, limit } => write!(
                f,
                "fleet covers {} cells, at most {} are allowed",
                cells, limit
            ),
            PlacementError::OutOfBounds {
                origin,
                length,
                orientation,
            } => write!(
                f,
                "{:?} ship of length {} at {} leaves the board",
                orientation, length, origin
            ),
            PlacementError::Overlap { at } => write!(f, "cell {} is already occupied", at),
            PlacementError::Stalled { length, attempts } => write!(
                f,
                "no room for a ship of length {} after {} attempts",
                length, attempts
            ),
        }
    }
}

impl std::error::Error for PlacementError {}
