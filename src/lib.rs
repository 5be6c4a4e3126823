//! Engine for a game of sea battle between a human and an automated
//! opponent on a 10×10 grid.

pub mod bitboard;
mod board;
mod common;
mod config;
mod coordinate;
mod game;
mod logging;
pub mod opponent;
mod placement;
pub mod prelude;
pub mod registry;
mod render;

pub use bitboard::{BitBoard, BitBoardError, Layer};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use game::*;
pub use logging::init_logging;
pub use opponent::{Opponent, RandomOpponent};
pub use placement::*;
pub use registry::{SessionRegistry, SharedSession};
pub use render::*;
