//! Symbol grids for display. Rendering never touches game state.

use core::fmt::Write;

use crate::board::Board;
use crate::common::CellState;
use crate::config::BOARD_SIZE;
use crate::coordinate::row_label;

/// One symbol per cell, indexed `[row][col]`.
pub type SymbolGrid = [[char; BOARD_SIZE]; BOARD_SIZE];

/// The owner's view: ships, hits and misses.
pub fn render_own_board(board: &Board) -> SymbolGrid {
    render(board, true)
}

/// What the other side knows: hits and misses, ships drawn as water.
pub fn render_opponent_view(board: &Board) -> SymbolGrid {
    render(board, false)
}

fn render(board: &Board, reveal_ships: bool) -> SymbolGrid {
    let mut grid = [[CellState::Empty.symbol(); BOARD_SIZE]; BOARD_SIZE];
    for (at, state) in board.cells() {
        let shown = match state {
            CellState::Ship if !reveal_ships => CellState::Empty,
            other => other,
        };
        grid[at.row()][at.col()] = shown.symbol();
    }
    grid
}

/// Text table with column numbers across the top and row letters down the
/// side:
///
/// ```text
///   1 2 3 4 5 6 7 8 9 10
/// A ~ S ~ ~ ~ ~ ~ ~ ~ ~
/// ```
pub fn format_grid(grid: &SymbolGrid) -> String {
    let mut out = String::from(" ");
    for col in 1..=BOARD_SIZE {
        let _ = write!(out, " {}", col);
    }
    for (row, cells) in grid.iter().enumerate() {
        out.push('\n');
        out.push(row_label(row));
        for &symbol in cells {
            out.push(' ');
            out.push(symbol);
        }
    }
    out
}
