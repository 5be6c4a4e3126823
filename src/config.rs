//! Board dimensions, the default fleet and the retry limits used by the
//! random placement and targeting loops.

use serde::Serialize;

use crate::common::PlacementError;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 10;
/// Number of cells on one board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// One four-cell ship, two of three, three of two and four single-cell boats.
pub const DEFAULT_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Upper bound on occupied cells for a fleet to be accepted. Rejection
/// sampling stays cheap while at least half of the board is free.
pub const MAX_FLEET_CELLS: usize = BOARD_CELLS / 2;

/// Random anchors tried per ship before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Random cells tried by the opponent before it falls back to picking from
/// the list of unshot cells.
pub const MAX_TARGET_ATTEMPTS: usize = 1_000;

/// Environment variable holding the log level (`error`..`trace`, `off`).
pub const LOG_ENV_VAR: &str = "SEABATTLE_LOG";

/// Ordered list of ship lengths making up one side's fleet.
///
/// Construction validates the fleet against the board so that a bad
/// configuration is reported once, up front, instead of during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetSpec {
    lengths: Vec<usize>,
}

impl FleetSpec {
    pub fn new(lengths: Vec<usize>) -> Result<Self, PlacementError> {
        if lengths.is_empty() {
            return Err(PlacementError::EmptyFleet);
        }
        if let Some(&length) = lengths.iter().find(|&&l| l == 0 || l > BOARD_SIZE) {
            return Err(PlacementError::InvalidLength { length });
        }
        let cells: usize = lengths.iter().sum();
        if cells > MAX_FLEET_CELLS {
            return Err(PlacementError::FleetTooDense {
                cells,
                limit: MAX_FLEET_CELLS,
            });
        }
        Ok(Self { lengths })
    }

    /// Ship lengths in placement order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn ship_count(&self) -> usize {
        self.lengths.len()
    }

    /// Cells covered once every ship is placed.
    pub fn total_cells(&self) -> usize {
        self.lengths.iter().sum()
    }
}

impl Default for FleetSpec {
    fn default() -> Self {
        Self {
            lengths: DEFAULT_FLEET.to_vec(),
        }
    }
}
