//! Line-oriented text protocol for driving a game session.
//!
//! Each request is one line; each produces exactly one response line.
//!
//! ## Requests
//!
//! - `00 X` / `00 O` - start a game, the human plays `X` (moves first) or `O`
//! - `01` - print the board
//! - `02 C R` - human places at column `C`, row `R` (single digits)
//! - `03` - bot move
//! - `04` - skip the current side's turn
//!
//! ## Responses
//!
//! `OK`, `INVFMT`, `NO GAME`, `OOT`, `ILLMOVE`, `WIN`, `LOSE`, `TIE`, or a
//! board snapshot: 64 cell symbols (`X`, `O`, `-`) row-major, a tab, and the
//! symbol of the side to move.
//!
//! Lines that do not decode are answered with `INVFMT` and never reach the
//! session.
//!
//! ## Example
//!
//! ```
//! use reversi_engine::protocol::Server;
//!
//! let server = Server::new();
//! let mut out = Vec::new();
//! server.run("00 X\n02 3 2\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "OK\nOK\n");
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use derive_more::{Display, Error};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::board::Side;
use crate::engine::{Command, ErrorKind, GameSession, Response};

/// Longest request payload, excluding the line terminator.
pub const MAX_LINE: usize = 6;

/// Why a request line failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ProtocolError {
    #[display("line longer than {} bytes", MAX_LINE)]
    TooLong,
    #[display("line must start with '0'")]
    BadPrefix,
    #[display("unknown opcode {_0:?}")]
    UnknownOpcode(#[error(not(source))] char),
    #[display("malformed arguments for opcode {_0:?}")]
    Malformed(#[error(not(source))] char),
    #[display("invalid side {_0:?}")]
    BadSide(#[error(not(source))] char),
    #[display("invalid coordinate {_0:?}")]
    BadCoordinate(#[error(not(source))] char),
}

fn digit(b: u8) -> Result<usize, ProtocolError> {
    if b.is_ascii_digit() {
        Ok(usize::from(b - b'0'))
    } else {
        Err(ProtocolError::BadCoordinate(b as char))
    }
}

/// Decode one request line (without its terminator) into a [`Command`].
pub fn decode(line: &str) -> Result<Command, ProtocolError> {
    let bytes = line.as_bytes();
    if bytes.len() > MAX_LINE {
        return Err(ProtocolError::TooLong);
    }

    match bytes {
        [b'0', b'0', b' ', side] => {
            let c = *side as char;
            let human_side = Side::from_symbol(c).ok_or(ProtocolError::BadSide(c))?;
            Ok(Command::StartGame { human_side })
        }
        [b'0', b'1'] => Ok(Command::PrintBoard),
        [b'0', b'2', b' ', col, b' ', row] => Ok(Command::PlaceMove {
            row: digit(*row)?,
            col: digit(*col)?,
        }),
        [b'0', b'3'] => Ok(Command::BotMove),
        [b'0', b'4'] => Ok(Command::SkipTurn),
        [b'0', op @ b'0'..=b'4', ..] => Err(ProtocolError::Malformed(*op as char)),
        [b'0', op, ..] => Err(ProtocolError::UnknownOpcode(*op as char)),
        _ => Err(ProtocolError::BadPrefix),
    }
}

/// Encode a [`Response`] as a single line (without terminator).
pub fn encode(response: &Response) -> String {
    match response {
        Response::Ok => "OK".to_string(),
        Response::Error(kind) => match kind {
            ErrorKind::InvalidFormat => "INVFMT",
            ErrorKind::NoGame => "NO GAME",
            ErrorKind::OutOfTurn => "OOT",
            ErrorKind::IllegalMove => "ILLMOVE",
        }
        .to_string(),
        Response::BoardSnapshot { board, turn } => {
            let mut out: String = board.rows().flatten().map(|c| c.symbol()).collect();
            out.push('\t');
            out.push(turn.symbol());
            out
        }
        Response::Outcome(result) => result.to_string(),
    }
}

/// A game session shared between callers.
///
/// Each command holds the lock for its whole duration, so commands from
/// different callers never interleave.
#[derive(Clone, Default)]
pub struct SharedSession(Arc<Mutex<GameSession>>);

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_session(session: GameSession) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn execute(&self, command: Command) -> Response {
        self.0.lock().execute(command)
    }

    /// A copy of the current session state.
    pub fn snapshot(&self) -> GameSession {
        self.0.lock().clone()
    }
}

/// Protocol front end over a [`SharedSession`].
#[derive(Clone, Default)]
pub struct Server {
    session: SharedSession,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: SharedSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Decode, execute and encode one request line.
    pub fn handle_line(&self, line: &str) -> String {
        let response = match decode(line) {
            Ok(command) => self.session.execute(command),
            Err(e) => {
                warn!(line, error = %e, "rejected request");
                Response::Error(ErrorKind::InvalidFormat)
            }
        };
        encode(&response)
    }

    /// Serve requests from `input` until EOF, writing one response line per
    /// non-blank request.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read request")?;
            if line.trim().is_empty() {
                continue;
            }

            let reply = self.handle_line(&line);
            debug!(request = %line, %reply, "handled");
            writeln!(output, "{reply}").context("failed to write response")?;
            output.flush().context("failed to flush response")?;
        }
        Ok(())
    }
}
