//! Fixed-size N×N bit sets packed into one unsigned integer.
//!
//! A [`Board`](crate::Board) keeps one [`Layer`] per fact it tracks (ship
//! cells, hits, misses) and derives each cell's state from their overlap.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::{BOARD_CELLS, BOARD_SIZE};
use crate::coordinate::Coordinate;

const _: () = assert!(BOARD_CELLS <= u128::BITS as usize);

/// Bit layer sized for the game board.
pub type Layer = BitBoard<u128, BOARD_SIZE>;

/// Errors returned by [`BitBoard`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column is outside `0..N`.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is out of bounds", row, col)
            }
        }
    }
}

impl std::error::Error for BitBoardError {}

/// An N×N grid of flags stored in `T`, row-major from the low bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    fn mask() -> T {
        if Self::CELLS >= mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    /// Empty board. `N * N` must fit in `T`; [`Layer`] checks this at
    /// compile time.
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        Ok(self.bit(Self::index(row, col)?))
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(row, col)?;
        self.set_bit(idx);
        Ok(())
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Builds a board from raw bits, dropping anything past `N * N`.
    pub fn from_raw(raw: T) -> Self {
        BitBoard {
            bits: raw & Self::mask(),
        }
    }

    /// `(row, col)` of every set cell, row-major.
    pub fn iter_set_bits(&self) -> SetBits<T, N> {
        SetBits {
            bits: self.bits,
            idx: 0,
        }
    }

    fn index(row: usize, col: usize) -> Result<usize, BitBoardError> {
        if row >= N || col >= N {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(row * N + col)
        }
    }

    fn bit(&self, idx: usize) -> bool {
        ((self.bits >> idx) & T::one()) != T::zero()
    }

    fn set_bit(&mut self, idx: usize) {
        self.bits = self.bits | (T::one() << idx);
    }
}

impl Layer {
    /// Whether the cell is set.
    pub fn contains(&self, at: Coordinate) -> bool {
        self.bit(Self::cell_index(at))
    }

    pub fn insert(&mut self, at: Coordinate) {
        self.set_bit(Self::cell_index(at));
    }

    /// Set cells as coordinates, row-major.
    pub fn coordinates(self) -> impl Iterator<Item = Coordinate> {
        self.iter_set_bits()
            .filter_map(|(row, col)| Coordinate::new(row, col))
    }

    // in range: a Coordinate is always on the board
    fn cell_index(at: Coordinate) -> usize {
        at.row() * BOARD_SIZE + at.col()
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}> ({} set):", N, self.count_ones())?;
        for r in 0..N {
            for c in 0..N {
                let set = self.bit(r * N + c);
                write!(f, "{}", if set { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a [`BitBoard`].
#[derive(Clone, Copy)]
pub struct SetBits<T, const N: usize> {
    bits: T,
    idx: usize,
}

impl<T, const N: usize> Iterator for SetBits<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some((idx / N, idx % N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

/// Complement within the board; bits past `N * N` stay clear.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn not(self) -> Self {
        Self::from_raw(!self.bits)
    }
}
