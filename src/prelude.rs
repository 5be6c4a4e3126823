//! Commonly used types and functions for ease of import.

pub use crate::{
    format_grid, parse_coordinate, render_opponent_view, render_own_board, Board, CellState,
    Coordinate, FleetSpec, Phase, ShotOutcome, ShotResult, Session, SessionError, Side,
};

pub use crate::registry::{SessionRegistry, SharedSession};
