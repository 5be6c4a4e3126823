//! Board coordinates and their text form (`"A3"` is row A, column 3).

use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::Serialize;

use crate::common::Orientation;
use crate::config::BOARD_SIZE;

/// A cell position, always within the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Returns `None` when either index falls outside the board.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn row(self) -> usize {
        self.row
    }

    pub const fn col(self) -> usize {
        self.col
    }

    /// Uniformly random cell.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            row: rng.random_range(0..BOARD_SIZE),
            col: rng.random_range(0..BOARD_SIZE),
        }
    }

    /// Cell `steps` further along `orientation`, if still on the board.
    pub fn step(self, orientation: Orientation, steps: usize) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => Self::new(self.row, self.col.checked_add(steps)?),
            Orientation::Vertical => Self::new(self.row.checked_add(steps)?, self.col),
        }
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }
}

/// Letter naming a row (`0` is `'A'`).
pub fn row_label(row: usize) -> char {
    char::from(b'A' + (row % 26) as u8)
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row), self.col + 1)
    }
}

/// Why a piece of text is not a valid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseError {
    /// Fewer than two characters.
    TooShort,
    /// The first character is not a letter.
    NotAlphabetic(char),
    /// Something other than digits follows the letter.
    NotDigits,
    /// Row or column lies outside the board.
    OutOfRange,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooShort => write!(f, "expected a letter followed by a number, e.g. A3"),
            ParseError::NotAlphabetic(c) => write!(f, "'{}' is not a row letter", c),
            ParseError::NotDigits => write!(f, "column must be a number"),
            ParseError::OutOfRange => write!(
                f,
                "coordinate is off the board (rows A-{}, columns 1-{})",
                row_label(BOARD_SIZE - 1),
                BOARD_SIZE
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a row letter followed by a 1-based column number.
///
/// The letter is case-insensitive. Input is not trimmed.
pub fn parse_coordinate(text: &str) -> Result<Coordinate, ParseError> {
    let mut chars = text.chars();
    let letter = chars.next().ok_or(ParseError::TooShort)?;
    let digits = chars.as_str();
    if digits.is_empty() {
        return Err(ParseError::TooShort);
    }
    if !letter.is_alphabetic() {
        return Err(ParseError::NotAlphabetic(letter));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotDigits);
    }

    let letter = letter.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return Err(ParseError::OutOfRange);
    }
    let row = (letter as u8 - b'A') as usize;
    // only overflow can fail here, which is off the board as well
    let number: usize = digits.parse().map_err(|_| ParseError::OutOfRange)?;
    let col = number.checked_sub(1).ok_or(ParseError::OutOfRange)?;
    Coordinate::new(row, col).ok_or(ParseError::OutOfRange)
}

impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinate(s)
    }
}
