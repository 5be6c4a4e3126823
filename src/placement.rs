//! Random fleet layout by rejection sampling.
//!
//! Each ship draws an anchor cell anywhere on the board and a direction,
//! and retries until the whole run lies on empty cells. With the default
//! fleet covering a fifth of the board a handful of draws is typical;
//! [`MAX_PLACEMENT_ATTEMPTS`] only matters for unusually dense fleets.

use log::{debug, warn};
use rand::Rng;

use crate::board::Board;
use crate::common::{Orientation, PlacementError};
use crate::config::{FleetSpec, BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::coordinate::Coordinate;

/// Find a free origin and orientation for a ship of `length`.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    length: usize,
    rng: &mut R,
) -> Result<(Coordinate, Orientation), PlacementError> {
    if length == 0 || length > BOARD_SIZE {
        return Err(PlacementError::InvalidLength { length });
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let origin = Coordinate::random(rng);
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        if board.can_place(origin, length, orientation) {
            return Ok((origin, orientation));
        }
    }
    warn!(
        "gave up placing a ship of length {} after {} attempts",
        length, MAX_PLACEMENT_ATTEMPTS
    );
    Err(PlacementError::Stalled {
        length,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Place every ship of `fleet` on `board`, in order.
///
/// On error the board is left exactly as it was.
pub fn place_fleet<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &FleetSpec,
    rng: &mut R,
) -> Result<(), PlacementError> {
    let mut layout = *board;
    for &length in fleet.lengths() {
        let (origin, orientation) = random_placement(&layout, length, rng)?;
        layout.place_ship(origin, length, orientation)?;
    }
    *board = layout;
    debug!(
        "fleet of {} ships placed over {} cells",
        fleet.ship_count(),
        fleet.total_cells()
    );
    Ok(())
}
