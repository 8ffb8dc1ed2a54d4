//! Reversi move rules: capture scanning, legality, and move execution.
//!
//! A placement is legal when the target cell is empty and, in at least one
//! of the eight directions, the cells next to it form a non-empty run of
//! opponent pieces closed off by one of the mover's own pieces. Playing the
//! move flips every such run.
//!
//! The read-only queries ([`scan`], [`has_capture`], [`capture_set`],
//! [`any_legal_move`], ...) never touch the board. [`apply`] is the only
//! function that changes cell contents during play, and it either performs
//! the whole move or leaves the board as it was.

use derive_more::{Display, Error};
use tracing::debug;

use crate::board::{Board, Cell, Point, Side};
use crate::constants::DIRECTIONS;

/// A unit step `(d_row, d_col)`, one of [`DIRECTIONS`].
pub type Direction = (isize, isize);

/// Opponent pieces that would flip along one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRun {
    pub direction: Direction,
    /// Flipped cells, nearest to the origin first. Never empty.
    pub cells: Vec<Point>,
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// Coordinates outside the board.
    #[display("point is off the board")]
    OffBoard,
    /// Target cell already holds a piece.
    #[display("point is not empty")]
    Occupied,
    /// No direction captures anything.
    #[display("move captures nothing")]
    NoCapture,
}

/// Step one cell from `pt` in `direction`, or `None` when leaving the board.
#[inline]
fn step((row, col): Point, (d_row, d_col): Direction) -> Option<Point> {
    let next = (row.checked_add_signed(d_row)?, col.checked_add_signed(d_col)?);
    Board::contains(next).then_some(next)
}

// =============================================================================
// Direction scanning
// =============================================================================

/// Scan from `origin` along `direction` for a capture by `side`.
///
/// The origin cell itself is never inspected. Returns the run of opponent
/// cells if it is non-empty and terminated by a `side` piece; returns `None`
/// when the walk hits an empty cell or leaves the board first.
pub fn scan(board: &Board, origin: Point, side: Side, direction: Direction) -> Option<CaptureRun> {
    let own = side.cell();
    let opponent = (!side).cell();
    let mut cells = Vec::new();
    let mut pt = origin;

    loop {
        pt = step(pt, direction)?;
        match board.get(pt)? {
            c if c == opponent => cells.push(pt),
            c if c == own => {
                return (!cells.is_empty()).then_some(CaptureRun { direction, cells });
            }
            _ => return None,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// All capturing runs for `side` placing at `origin`, in [`DIRECTIONS`] order.
///
/// Does not check that `origin` is empty.
pub fn capture_set(board: &Board, origin: Point, side: Side) -> Vec<CaptureRun> {
    DIRECTIONS
        .iter()
        .filter_map(|&d| scan(board, origin, side, d))
        .collect()
}

/// Whether placing `side` at `origin` would capture in at least one direction.
///
/// Short-circuits on the first capturing direction. Does not check that
/// `origin` is empty.
pub fn has_capture(board: &Board, origin: Point, side: Side) -> bool {
    DIRECTIONS
        .iter()
        .any(|&d| scan(board, origin, side, d).is_some())
}

/// Whether `side` may legally place at `origin`.
pub fn is_legal(board: &Board, origin: Point, side: Side) -> bool {
    board.get(origin).is_some_and(Cell::is_empty) && has_capture(board, origin, side)
}

/// Whether `side` has any legal placement. Scans row-major and stops at the
/// first hit.
pub fn any_legal_move(board: &Board, side: Side) -> bool {
    first_legal_move(board, side).is_some()
}

/// The first legal placement for `side` in row-major order.
pub fn first_legal_move(board: &Board, side: Side) -> Option<Point> {
    Board::points().find(|&pt| is_legal(board, pt, side))
}

/// Every legal placement for `side`, row-major.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Point> {
    Board::points()
        .filter(|&pt| is_legal(board, pt, side))
        .collect()
}

/// Whether neither side can place anywhere.
pub fn is_terminal(board: &Board) -> bool {
    !any_legal_move(board, Side::A) && !any_legal_move(board, Side::B)
}

// =============================================================================
// Execution
// =============================================================================

/// Place a `side` piece at `origin` and flip every captured run.
///
/// Returns the number of flipped pieces. On error the board is unchanged:
/// all checks run before the first write.
pub fn apply(board: &mut Board, origin: Point, side: Side) -> Result<usize, IllegalMove> {
    match board.get(origin) {
        None => return Err(IllegalMove::OffBoard),
        Some(Cell::Empty) => {}
        Some(_) => return Err(IllegalMove::Occupied),
    }

    let runs = capture_set(board, origin, side);
    if runs.is_empty() {
        return Err(IllegalMove::NoCapture);
    }

    let piece = side.cell();
    board.set(origin, piece);
    let mut flipped = 0;
    for run in &runs {
        for &pt in &run.cells {
            board.set(pt, piece);
        }
        flipped += run.cells.len();
    }

    debug!(?origin, %side, flipped, directions = runs.len(), "applied move");
    Ok(flipped)
}
