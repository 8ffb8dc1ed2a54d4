//! The 8x8 Reversi board.
//!
//! `Board` is plain data: a row-major grid of [`Cell`]s. All rule logic
//! (scanning, validation, flipping) lives in [`crate::rules`], which is also
//! the only place that changes cell contents during play.

use std::fmt;
use std::ops::Not;

use derive_more::{Display, Error};

use crate::constants::{CELLS, N, SYMBOL_A, SYMBOL_B, SYMBOL_EMPTY};

/// One of the two sides. `A` always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The cell state holding this side's piece.
    pub fn cell(self) -> Cell {
        match self {
            Side::A => Cell::A,
            Side::B => Cell::B,
        }
    }

    /// Wire symbol for this side (`X` or `O`).
    pub fn symbol(self) -> char {
        self.cell().symbol()
    }

    /// Parse a side from its wire symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match Cell::from_symbol(c)? {
            Cell::A => Some(Side::A),
            Cell::B => Some(Side::B),
            Cell::Empty => None,
        }
    }
}

impl Not for Side {
    type Output = Self;

    /// The opposing side.
    fn not(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    A,
    B,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        let b = match self {
            Cell::Empty => SYMBOL_EMPTY,
            Cell::A => SYMBOL_A,
            Cell::B => SYMBOL_B,
        };
        b as char
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match u8::try_from(c).ok()? {
            SYMBOL_EMPTY => Some(Cell::Empty),
            SYMBOL_A => Some(Cell::A),
            SYMBOL_B => Some(Cell::B),
            _ => None,
        }
    }
}

/// A `(row, col)` coordinate. Both components are in `0..N` on the board.
pub type Point = (usize, usize);

/// Error building a board from text rows.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// A row does not have exactly `N` cells.
    #[display("row {row} has {len} cells, expected {}", N)]
    RowLength { row: usize, len: usize },
    /// A character is not a cell symbol.
    #[display("invalid cell symbol {symbol:?} at ({row}, {col})")]
    Symbol { row: usize, col: usize, symbol: char },
}

/// An 8x8 grid of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The starting layout: four pieces in the center, `A` on the
    /// (3,4)/(4,3) diagonal and `B` on (3,3)/(4,4).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set((3, 3), Cell::B);
        board.set((3, 4), Cell::A);
        board.set((4, 3), Cell::A);
        board.set((4, 4), Cell::B);
        board
    }

    /// A board with no pieces at all.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Build a board from `N` rows of cell symbols (`X`, `O`, `-`).
    ///
    /// Used to set up engineered positions.
    pub fn from_rows(rows: [&str; N]) -> Result<Self, ParseBoardError> {
        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != N {
                return Err(ParseBoardError::RowLength { row, len });
            }
            for (col, symbol) in text.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(ParseBoardError::Symbol { row, col, symbol })?;
                board.set((row, col), cell);
            }
        }
        Ok(board)
    }

    fn idx((row, col): Point) -> usize {
        row * N + col
    }

    /// Whether a point lies on the board.
    pub fn contains((row, col): Point) -> bool {
        row < N && col < N
    }

    /// Cell at `pt`, or `None` if `pt` is off the board.
    pub fn get(&self, pt: Point) -> Option<Cell> {
        if !Self::contains(pt) {
            return None;
        }
        Some(self.cells[Self::idx(pt)])
    }

    /// Overwrite a cell. Callers guarantee `pt` is on the board.
    pub(crate) fn set(&mut self, pt: Point, cell: Cell) {
        self.cells[Self::idx(pt)] = cell;
    }

    /// Iterate over all points in row-major order.
    pub fn points() -> impl Iterator<Item = Point> {
        (0..N).flat_map(|row| (0..N).map(move |col| (row, col)))
    }

    /// Number of cells in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Number of occupied cells.
    pub fn total_pieces(&self) -> usize {
        CELLS - self.count(Cell::Empty)
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(N)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
