//! Drives the interactive session with scripted input.

use std::io::Cursor;

use chess_cli::{Command, SaveStore, Session, SessionError};
use chess_core::{Color, PieceKind, Square};
use chess_engine::{Game, GameError, GameStatus};
use tempfile::TempDir;

fn run_script(store: SaveStore, script: &str) -> (Game, String) {
    let mut session = Session::new(Game::new(), store, false, Vec::new());
    session.run(Cursor::new(script.to_string())).unwrap();
    let game = session.game().clone();
    let output = String::from_utf8(session.into_output()).unwrap();
    (game, output)
}

#[test]
fn plays_fools_mate() {
    let temp = TempDir::new().unwrap();
    let script = "\
select 5 6
move 5 5
select 4 1
move 4 3
select 6 6
move 6 4
select 3 0
move 7 4
select 4 7
";
    let (game, output) = run_script(SaveStore::new(temp.path()), script);

    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
    assert!(output.contains("checkmate, Black wins (code 1)"));
    assert!(output.contains("error: game is over"));
}

#[test]
fn errors_do_not_end_the_session() {
    let temp = TempDir::new().unwrap();
    let script = "\
dance
select 4 1
select 4 4
moves
select 4 6
move 4 2
move 4 4
quit
select 3 1
";
    let (game, output) = run_script(SaveStore::new(temp.path()), script);

    assert!(output.contains("error: unknown command: 'dance'"));
    assert!(output.contains("error: it is White's turn"));
    assert!(output.contains("error: no piece selected"));
    assert!(output.contains("moves: (4, 5) (4, 4)"));
    assert!(output.contains("error: illegal move to (4, 2)"));
    // Input after quit is ignored.
    assert_eq!(game.turn(), Color::Black);
    assert!(game.position().get(Square::new(3, 1)).is_some());
}

#[test]
fn save_list_and_load() {
    let temp = TempDir::new().unwrap();
    let store = SaveStore::new(temp.path().join("saves"));
    let script = "\
select 6 7
move 5 5
save knight-out
list
new
load knight-out
state
";
    let (game, output) = run_script(store.clone(), script);

    assert_eq!(store.list().unwrap(), vec!["knight-out"]);
    assert!(output.contains("knight-out\n"));
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(
        game.position().get(Square::new(5, 5)).map(|p| p.kind()),
        Some(PieceKind::Knight)
    );
    assert!(output.contains("\"active\": \"black\""));
}

#[test]
fn promotion_waits_for_a_choice() {
    let temp = TempDir::new().unwrap();
    let text = "\
black king 7 0 0 true
white pawn 0 1 0 true
white king 4 7 0 true
white
-
white:
black:
";
    std::fs::write(temp.path().join("promo"), text).unwrap();
    let store = SaveStore::new(temp.path());

    let mut session = Session::new(Game::new(), store, false, Vec::new());
    session.execute(Command::Load("promo".to_string())).unwrap();
    session.execute(Command::Select(Square::new(0, 1))).unwrap();
    session.execute(Command::Move(Square::new(0, 0))).unwrap();

    assert!(matches!(
        session.execute(Command::Move(Square::new(4, 6))),
        Err(SessionError::Game(GameError::PromotionPending(_)))
    ));
    assert!(matches!(
        session.execute(Command::Select(Square::new(7, 0))),
        Err(SessionError::Game(GameError::PromotionPending(_)))
    ));

    session.execute(Command::Promote(PieceKind::Rook)).unwrap();
    let game = session.game();
    assert_eq!(
        game.position().get(Square::new(0, 0)).map(|p| p.kind()),
        Some(PieceKind::Rook)
    );
    assert!(matches!(
        session.execute(Command::Promote(PieceKind::Queen)),
        Err(SessionError::NoPendingPromotion)
    ));
}

#[test]
fn loading_unknown_save_reports_error() {
    let temp = TempDir::new().unwrap();
    let mut session = Session::new(Game::new(), SaveStore::new(temp.path()), true, Vec::new());
    let err = session
        .execute(Command::Load("missing".to_string()))
        .unwrap_err();
    assert_eq!(err.to_string(), "no saved game named 'missing'");

    let err = session.execute(Command::Moves).unwrap_err();
    assert!(matches!(err, SessionError::Game(GameError::InvalidSelection)));
}
