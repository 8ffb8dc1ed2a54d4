//! Board geometry and protocol symbols.
//!
//! Reversi is always played on an 8x8 board. Coordinates are `(row, col)`
//! pairs in `0..N`, row-major, with row 0 at the top.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Number of pieces on a freshly started board.
pub const INITIAL_PIECES: usize = 4;

// =============================================================================
// Directions
// =============================================================================

/// The eight unit vectors `(d_row, d_col)` a capture can run along.
/// Order: N, NE, E, SE, S, SW, W, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),  // North (up one row)
    (-1, 1),  // NE
    (0, 1),   // East
    (1, 1),   // SE
    (1, 0),   // South
    (1, -1),  // SW
    (0, -1),  // West
    (-1, -1), // NW
];

// =============================================================================
// Cell Symbols
// =============================================================================

/// Piece of the side that moves first.
pub const SYMBOL_A: u8 = b'X';

/// Piece of the side that moves second.
pub const SYMBOL_B: u8 = b'O';

/// Empty cell.
pub const SYMBOL_EMPTY: u8 = b'-';
