//! Random self-play.
//!
//! Plays complete games through a [`GameSession`]: the human seat picks a
//! uniformly random legal move, the bot seat issues [`Command::BotMove`], and
//! a side without any legal move skips. Useful for smoke-testing the engine
//! and for checking invariants over many games.

use crate::board::{Board, Side};
use crate::engine::{Command, ErrorKind, GameSession, Response};
use crate::rules;
use crate::score::GameResult;

/// Summary of one finished game.
#[derive(Clone, Debug)]
pub struct PlayoutReport {
    pub result: GameResult,
    /// Successful placements by either side.
    pub placements: usize,
    pub skips: usize,
    pub board: Board,
}

/// Win/loss/tie tally over several games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl Tally {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Lose => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

/// Choose the next command for the side to move.
fn next_command(session: &GameSession, rng: &mut fastrand::Rng) -> Command {
    let board = session.board();
    let turn = session.turn();
    if turn == session.bot_side() {
        return if rules::any_legal_move(board, turn) {
            Command::BotMove
        } else {
            Command::SkipTurn
        };
    }

    let moves = rules::legal_moves(board, turn);
    if moves.is_empty() {
        return Command::SkipTurn;
    }
    let (row, col) = moves[rng.usize(..moves.len())];
    Command::PlaceMove { row, col }
}

/// Play one game to the end with the human seat on `human_side`.
///
/// Returns the engine's error if it ever refuses a command, which would
/// mean the driver and the engine disagree about legality.
pub fn self_play(human_side: Side, rng: &mut fastrand::Rng) -> Result<PlayoutReport, ErrorKind> {
    let mut session = GameSession::new();
    session.execute(Command::StartGame { human_side });

    let mut placements = 0;
    let mut skips = 0;
    loop {
        let command = next_command(&session, rng);
        match session.execute(command) {
            Response::Ok if command == Command::SkipTurn => skips += 1,
            Response::Ok => placements += 1,
            Response::Outcome(result) => {
                return Ok(PlayoutReport {
                    result,
                    placements: placements + 1,
                    skips,
                    board: *session.board(),
                });
            }
            Response::Error(kind) => return Err(kind),
            // Only PrintBoard answers with a snapshot, and self-play never sends it.
            Response::BoardSnapshot { .. } => return Err(ErrorKind::InvalidFormat),
        }
    }
}

/// Play `games` games from one seed and tally the human's results.
pub fn run_games(human_side: Side, seed: u64, games: usize) -> Result<Tally, ErrorKind> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tally = Tally::default();
    for _ in 0..games {
        tally.record(self_play(human_side, &mut rng)?.result);
    }
    Ok(tally)
}
