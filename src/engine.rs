//! The turn engine: a single game session driven by decoded commands.
//!
//! A [`GameSession`] owns its board exclusively and moves through three
//! phases:
//!
//! - [`Phase::NotStarted`] - no game yet (or the last one has been fully retired)
//! - [`Phase::InProgress`] - moves are accepted for the side in `turn`
//! - [`Phase::JustEnded`] - neither side could move after the last placement;
//!   the result has been reported and one `PrintBoard` may still show the
//!   final board
//!
//! Every command runs to completion, including end-of-game detection and
//! scoring, before its [`Response`] is returned. A rejected command leaves
//! the board, the turn and the sides exactly as they were.

use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::board::{Board, Point, Side};
use crate::rules::{self, IllegalMove};
use crate::score::{self, GameResult};

/// A decoded request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reset the board and start a new game; the human plays `human_side`.
    StartGame { human_side: Side },
    /// Show the board and whose turn it is.
    PrintBoard,
    /// The human places a piece.
    PlaceMove { row: usize, col: usize },
    /// The bot places a piece at the first legal cell, row-major.
    BotMove,
    /// The side to move passes; only allowed when it has no legal move.
    SkipTurn,
}

/// Reasons a command is refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Error)]
pub enum ErrorKind {
    /// The request line could not be decoded. Raised by the transport only.
    #[display("invalid command format")]
    InvalidFormat,
    /// No game is in progress.
    #[display("no game in progress")]
    NoGame,
    /// It is the other side's turn.
    #[display("out of turn")]
    OutOfTurn,
    /// The move (or pass) is not allowed in this position.
    #[display("illegal move")]
    IllegalMove,
}

impl From<IllegalMove> for ErrorKind {
    fn from(_: IllegalMove) -> Self {
        ErrorKind::IllegalMove
    }
}

/// A decoded reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Ok,
    Error(ErrorKind),
    BoardSnapshot { board: Board, turn: Side },
    /// The game ended; the result is from the human's point of view.
    Outcome(GameResult),
}

impl From<ErrorKind> for Response {
    fn from(kind: ErrorKind) -> Self {
        Response::Error(kind)
    }
}

/// Lifecycle of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    InProgress,
    JustEnded,
}

/// One game between the human and the bot.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Side,
    human_side: Side,
    phase: Phase,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// A session with no game started.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Side::A,
            human_side: Side::A,
            phase: Phase::NotStarted,
        }
    }

    /// A session already in progress from an arbitrary position.
    pub fn with_board(board: Board, human_side: Side, turn: Side) -> Self {
        Self {
            board,
            turn,
            human_side,
            phase: Phase::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side expected to move next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn human_side(&self) -> Side {
        self.human_side
    }

    pub fn bot_side(&self) -> Side {
        !self.human_side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Run one command against the session.
    #[instrument(level = "debug", skip(self), fields(phase = ?self.phase, turn = %self.turn))]
    pub fn execute(&mut self, command: Command) -> Response {
        let response = match command {
            Command::StartGame { human_side } => {
                self.start(human_side);
                Ok(Response::Ok)
            }
            Command::PrintBoard => self.print_board(),
            Command::PlaceMove { row, col } => self.place_move((row, col)),
            Command::BotMove => self.bot_move(),
            Command::SkipTurn => self.skip_turn(),
        };

        let response = response.unwrap_or_else(Response::from);
        debug!(?response, "command done");
        response
    }

    fn start(&mut self, human_side: Side) {
        self.board = Board::new();
        self.human_side = human_side;
        self.turn = Side::A;
        self.phase = Phase::InProgress;
        info!(%human_side, "game started");
    }

    /// The final board of a finished game can be shown exactly once.
    fn print_board(&mut self) -> Result<Response, ErrorKind> {
        match self.phase {
            Phase::NotStarted => Err(ErrorKind::NoGame),
            Phase::InProgress => Ok(self.snapshot()),
            Phase::JustEnded => {
                self.phase = Phase::NotStarted;
                Ok(self.snapshot())
            }
        }
    }

    fn snapshot(&self) -> Response {
        Response::BoardSnapshot {
            board: self.board,
            turn: self.turn,
        }
    }

    /// Common preconditions for a placement by `side`.
    fn check_turn(&self, side: Side) -> Result<(), ErrorKind> {
        if !self.is_active() {
            return Err(ErrorKind::NoGame);
        }
        if self.turn != side {
            return Err(ErrorKind::OutOfTurn);
        }
        Ok(())
    }

    fn place_move(&mut self, pt: Point) -> Result<Response, ErrorKind> {
        self.check_turn(self.human_side)?;
        rules::apply(&mut self.board, pt, self.human_side)?;
        Ok(self.finish_move())
    }

    fn bot_move(&mut self) -> Result<Response, ErrorKind> {
        let bot = self.bot_side();
        self.check_turn(bot)?;
        let pt = rules::first_legal_move(&self.board, bot).ok_or(ErrorKind::IllegalMove)?;
        rules::apply(&mut self.board, pt, bot)?;
        debug!(?pt, "bot moved");
        Ok(self.finish_move())
    }

    fn skip_turn(&mut self) -> Result<Response, ErrorKind> {
        if !self.is_active() {
            return Err(ErrorKind::NoGame);
        }
        if rules::any_legal_move(&self.board, self.turn) {
            return Err(ErrorKind::IllegalMove);
        }
        debug!(side = %self.turn, "turn skipped");
        self.turn = !self.turn;
        Ok(Response::Ok)
    }

    /// After a successful placement: end and score the game if nobody can
    /// move, otherwise hand the turn over.
    fn finish_move(&mut self) -> Response {
        if rules::is_terminal(&self.board) {
            self.phase = Phase::JustEnded;
            let result = score::score(&self.board, self.human_side);
            let (a, b) = score::final_counts(&self.board);
            info!(%result, a, b, "game over");
            return Response::Outcome(result);
        }
        self.turn = !self.turn;
        Response::Ok
    }
}
