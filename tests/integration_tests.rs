//! Integration tests for reversi-engine
//!
//! Game scenarios driven through `GameSession::execute`, the same entry point
//! the protocol server uses.

use reversi_engine::board::{Board, Cell, Side};
use reversi_engine::engine::{Command, ErrorKind, GameSession, Phase, Response};
use reversi_engine::rules::{any_legal_move, first_legal_move, is_terminal, legal_moves};
use reversi_engine::score::GameResult;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Start a fresh game with the human on `human_side`.
fn start(human_side: Side) -> GameSession {
    let mut session = GameSession::new();
    assert_eq!(
        session.execute(Command::StartGame { human_side }),
        Response::Ok
    );
    session
}

fn place(row: usize, col: usize) -> Command {
    Command::PlaceMove { row, col }
}

fn board(rows: [&str; 8]) -> Board {
    Board::from_rows(rows).expect("valid test board")
}

fn snapshot(session: &mut GameSession) -> (Board, Side) {
    match session.execute(Command::PrintBoard) {
        Response::BoardSnapshot { board, turn } => (board, turn),
        other => panic!("expected a board snapshot, got {other:?}"),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_start_game_layout() {
    let mut session = start(Side::A);
    let (board, turn) = snapshot(&mut session);

    assert_eq!(turn, Side::A);
    assert_eq!(board.get((3, 4)), Some(Cell::A));
    assert_eq!(board.get((4, 3)), Some(Cell::A));
    assert_eq!(board.get((3, 3)), Some(Cell::B));
    assert_eq!(board.get((4, 4)), Some(Cell::B));
    assert_eq!(board.total_pieces(), 4);
}

#[test]
fn test_first_capture_flips_center() {
    let mut session = start(Side::A);
    assert_eq!(session.execute(place(2, 3)), Response::Ok);

    let (board, turn) = snapshot(&mut session);
    assert_eq!(turn, Side::B);
    assert_eq!(board.get((2, 3)), Some(Cell::A));
    assert_eq!(board.get((3, 3)), Some(Cell::A));
    assert_eq!(board.get((4, 3)), Some(Cell::A));
    assert_eq!(board.get((4, 4)), Some(Cell::B));
}

#[test]
fn test_place_out_of_turn() {
    let mut session = start(Side::B);
    let before = *session.board();

    assert_eq!(
        session.execute(place(2, 4)),
        Response::Error(ErrorKind::OutOfTurn)
    );
    assert_eq!(*session.board(), before);
    assert_eq!(session.turn(), Side::A);
}

#[test]
fn test_place_on_occupied_cell() {
    let mut session = start(Side::A);
    let before = *session.board();

    assert_eq!(
        session.execute(place(3, 4)),
        Response::Error(ErrorKind::IllegalMove)
    );
    assert_eq!(*session.board(), before);
    assert_eq!(session.turn(), Side::A);
}

#[test]
fn test_place_out_of_range() {
    let mut session = start(Side::A);
    assert_eq!(
        session.execute(place(8, 8)),
        Response::Error(ErrorKind::IllegalMove)
    );
    assert_eq!(
        session.execute(place(9, 0)),
        Response::Error(ErrorKind::IllegalMove)
    );
}

#[test]
fn test_skip_turn_with_legal_move_refused() {
    let mut session = start(Side::A);
    assert_eq!(
        session.execute(Command::SkipTurn),
        Response::Error(ErrorKind::IllegalMove)
    );
    assert_eq!(session.turn(), Side::A);
}

#[test]
fn test_bot_opens_when_human_is_second() {
    let mut session = start(Side::B);
    assert_eq!(session.execute(Command::BotMove), Response::Ok);

    // A's first legal cell in row-major order is (2,3).
    let (board, turn) = snapshot(&mut session);
    assert_eq!(turn, Side::B);
    assert_eq!(board.get((2, 3)), Some(Cell::A));
    assert_eq!(board.get((3, 3)), Some(Cell::A));
}

#[test]
fn test_bot_takes_first_row_major_cell() {
    // Bot is B. Legal cells for B are (0,1) and (6,7); the scan picks (0,1).
    let position = board([
        "--XO----",
        "--------",
        "--------",
        "--------",
        "--------",
        "--------",
        "-----OX-",
        "--------",
    ]);
    assert_eq!(legal_moves(&position, Side::B), vec![(0, 1), (6, 7)]);

    let mut session = GameSession::with_board(position, Side::A, Side::B);
    assert_eq!(session.execute(Command::BotMove), Response::Ok);
    assert_eq!(session.board().get((0, 1)), Some(Cell::B));
    assert_eq!(session.board().get((0, 2)), Some(Cell::B));
    assert_eq!(session.board().get((6, 7)), Some(Cell::Empty));
    assert_eq!(session.turn(), Side::A);
}

#[test]
fn test_bot_without_moves_is_illegal() {
    // B (bot) has no legal move; A does.
    let position = board([
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXOO",
        "XXXXXX--",
    ]);
    let mut session = GameSession::with_board(position, Side::A, Side::B);
    assert_eq!(
        session.execute(Command::BotMove),
        Response::Error(ErrorKind::IllegalMove)
    );
    assert_eq!(*session.board(), position);

    assert_eq!(session.execute(Command::SkipTurn), Response::Ok);
    assert_eq!(session.turn(), Side::A);
    assert_eq!(session.execute(place(7, 6)), Response::Ok);
}

#[test]
fn test_game_end_reports_outcome_then_rejects_moves() {
    // Human is B and fills the last cell, capturing north and north-west.
    let position = board([
        "OOOOOOOO",
        "OOOOOOOO",
        "OOOOOOOO",
        "OOOOOOOO",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXX-",
    ]);
    let mut session = GameSession::with_board(position, Side::B, Side::B);
    let response = session.execute(place(7, 7));

    assert_eq!(session.board().count(Cell::A), 25);
    assert_eq!(session.board().count(Cell::B), 39);
    assert_eq!(response, Response::Outcome(GameResult::Win));
    assert_eq!(session.phase(), Phase::JustEnded);
    assert!(is_terminal(session.board()));

    let final_board = *session.board();
    let (shown, _) = snapshot(&mut session);
    assert_eq!(shown, final_board);

    assert_eq!(
        session.execute(place(0, 0)),
        Response::Error(ErrorKind::NoGame)
    );
    assert_eq!(
        session.execute(Command::BotMove),
        Response::Error(ErrorKind::NoGame)
    );
    assert_eq!(
        session.execute(Command::SkipTurn),
        Response::Error(ErrorKind::NoGame)
    );
}

#[test]
fn test_game_can_end_in_a_tie() {
    // A plays (7,7) and flips only (7,6), leaving 32 pieces each.
    let position = board([
        "OOOOOOOO",
        "OOOOOOOO",
        "OOOOOOOO",
        "OOOOOOOO",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXO-",
    ]);
    let mut session = GameSession::with_board(position, Side::A, Side::A);
    assert_eq!(session.execute(place(7, 7)), Response::Outcome(GameResult::Tie));
    assert_eq!(session.board().count(Cell::A), 32);
    assert_eq!(session.board().count(Cell::B), 32);
}

#[test]
fn test_losing_outcome_for_human() {
    // Bot (A) plays the last cell and ends up ahead.
    let position = board([
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "OOOOOOOO",
        "OOOOOOOO",
        "OOOOOXO-",
    ]);
    let mut session = GameSession::with_board(position, Side::B, Side::A);
    assert_eq!(
        session.execute(Command::BotMove),
        Response::Outcome(GameResult::Lose)
    );
}

#[test]
fn test_print_board_only_once_after_end() {
    let position = board([
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXO-",
    ]);
    let mut session = GameSession::with_board(position, Side::A, Side::A);
    assert_eq!(session.execute(place(7, 7)), Response::Outcome(GameResult::Win));

    assert_eq!(
        session.execute(Command::BotMove),
        Response::Error(ErrorKind::NoGame)
    );
    let (shown, turn) = snapshot(&mut session);
    assert_eq!(shown.count(Cell::A), 64);
    assert_eq!(turn, Side::A);
    assert_eq!(
        session.execute(Command::PrintBoard),
        Response::Error(ErrorKind::NoGame)
    );

    // A new game is always possible.
    assert_eq!(
        session.execute(Command::StartGame { human_side: Side::A }),
        Response::Ok
    );
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn test_rejected_move_after_end_keeps_final_board() {
    let position = board([
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXO-",
    ]);
    let mut session = GameSession::with_board(position, Side::A, Side::A);
    assert_eq!(session.execute(place(7, 7)), Response::Outcome(GameResult::Win));
    let final_board = *session.board();

    assert_eq!(
        session.execute(place(0, 0)),
        Response::Error(ErrorKind::NoGame)
    );
    assert_eq!(session.phase(), Phase::JustEnded);
    assert_eq!(*session.board(), final_board);

    let (shown, _) = snapshot(&mut session);
    assert_eq!(shown, final_board);
}

#[test]
fn test_full_game_against_bot() {
    // Human always plays its first legal cell too; the game must terminate.
    let mut session = start(Side::A);
    let mut placements = 0;

    let outcome = loop {
        let turn = session.turn();
        let command = if !any_legal_move(session.board(), turn) {
            Command::SkipTurn
        } else if turn == session.human_side() {
            let (row, col) = first_legal_move(session.board(), turn).unwrap();
            place(row, col)
        } else {
            Command::BotMove
        };

        match session.execute(command) {
            Response::Ok => {
                if command != Command::SkipTurn {
                    placements += 1;
                }
            }
            Response::Outcome(result) => {
                placements += 1;
                break result;
            }
            other => panic!("unexpected response {other:?} to {command:?}"),
        }
        assert!(placements <= 60);
    };

    assert_eq!(session.board().total_pieces(), 4 + placements);
    let (a, b) = (
        session.board().count(Cell::A),
        session.board().count(Cell::B),
    );
    let expected = match a.cmp(&b) {
        std::cmp::Ordering::Greater => GameResult::Win,
        std::cmp::Ordering::Less => GameResult::Lose,
        std::cmp::Ordering::Equal => GameResult::Tie,
    };
    assert_eq!(outcome, expected);
}
