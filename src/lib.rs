//! Reversi-Engine: a Reversi (Othello) rules engine behind a tiny text protocol.
//!
//! One human player and a deliberately simple bot (it always plays the first
//! legal cell in row-major order) alternate on an 8x8 board until neither
//! side can move; the board is then scored by piece count.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, directions and cell symbols
//! - [`board`] - Board, cell and side types
//! - [`rules`] - Capture scanning, legality and move execution
//! - [`score`] - Final piece counts and game result
//! - [`engine`] - Turn state machine driven by decoded commands
//! - [`protocol`] - Line codec and the stdin/stdout command loop
//! - [`playout`] - Random self-play
//!
//! ## Example
//!
//! ```
//! use reversi_engine::board::Side;
//! use reversi_engine::engine::{Command, GameSession, Response};
//!
//! let mut session = GameSession::new();
//! session.execute(Command::StartGame { human_side: Side::A });
//!
//! // Human opens at row 2, column 3; the bot answers.
//! assert_eq!(session.execute(Command::PlaceMove { row: 2, col: 3 }), Response::Ok);
//! assert_eq!(session.execute(Command::BotMove), Response::Ok);
//! assert_eq!(session.board().total_pieces(), 6);
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod playout;
pub mod protocol;
pub mod rules;
pub mod score;
