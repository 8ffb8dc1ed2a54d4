//! Final scoring.
//!
//! The game is scored by piece count alone; empty cells count for nobody.
//! Results are always reported from the human player's point of view.

use std::cmp::Ordering;

use derive_more::Display;

use crate::board::{Board, Cell, Side};

/// Outcome of a finished game for the human player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum GameResult {
    #[display("WIN")]
    Win,
    #[display("LOSE")]
    Lose,
    #[display("TIE")]
    Tie,
}

/// Piece counts as `(A, B)`.
pub fn final_counts(board: &Board) -> (usize, usize) {
    (board.count(Cell::A), board.count(Cell::B))
}

/// Number of pieces held by `side`.
pub fn count_pieces(board: &Board, side: Side) -> usize {
    board.count(side.cell())
}

/// Score the board for the human playing `human_side`.
pub fn score(board: &Board, human_side: Side) -> GameResult {
    let human = count_pieces(board, human_side);
    let bot = count_pieces(board, !human_side);
    match human.cmp(&bot) {
        Ordering::Greater => GameResult::Win,
        Ordering::Less => GameResult::Lose,
        Ordering::Equal => GameResult::Tie,
    }
}
