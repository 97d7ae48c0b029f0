//! Text rendering of the board.

use chess_core::Square;
use chess_engine::{Game, GameStatus, Piece};

/// Marker for an empty square that the selected piece can move to.
const TARGET: char = '*';
const EMPTY: char = '.';

/// Returns the character drawn for a piece.
pub fn piece_char(piece: &Piece, unicode: bool) -> char {
    if unicode {
        piece.kind().symbol(piece.color())
    } else {
        piece.kind().to_char(piece.color())
    }
}

/// Draws the board with column numbers on top and line numbers on the left.
///
/// Empty squares in `targets` are marked with `*`.
pub fn render_board(game: &Game, targets: &[Square], unicode: bool) -> String {
    let position = game.position();
    let mut out = String::from("  ");
    for column in 0..Square::SIZE {
        out.push(' ');
        out.push(char::from(b'0' + column));
    }
    out.push('\n');

    for line in 0..Square::SIZE {
        out.push(char::from(b'0' + line));
        out.push(' ');
        for column in 0..Square::SIZE {
            let square = Square::new(column, line);
            let cell = match position.get(square) {
                Some(piece) => piece_char(piece, unicode),
                None if targets.contains(&square) => TARGET,
                None => EMPTY,
            };
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

/// Describes the side to move, check, captures, and the game status.
pub fn render_status(game: &Game) -> String {
    let mut out = match game.status() {
        GameStatus::Ongoing => format!("{} to move", game.turn()),
        status => format!("{} (code {})", status, status.code()),
    };
    if let Some(king) = game.king_in_check() {
        out.push_str(&format!("\n{} is in check", king.color()));
    }
    if let Some(square) = game.pending_promotion() {
        out.push_str(&format!("\npawn on {} awaits promotion", square));
    }
    for color in chess_core::Color::ALL {
        let captured: Vec<&str> = game.captured_by(color).iter().map(|k| k.name()).collect();
        if !captured.is_empty() {
            out.push_str(&format!("\n{} captured: {}", color, captured.join(" ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_starting_board() {
        let board = render_board(&Game::new(), &[], false);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "   0 1 2 3 4 5 6 7");
        assert_eq!(lines[1], "0  r n b q k b n r");
        assert_eq!(lines[4], "3  . . . . . . . .");
        assert_eq!(lines[8], "7  R N B Q K B N R");
    }

    #[test]
    fn test_targets_and_unicode() {
        let targets = [Square::new(4, 5), Square::new(4, 4)];
        let board = render_board(&Game::new(), &targets, true);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[5], "4  . . . . * . . .");
        assert_eq!(lines[6], "5  . . . . * . . .");
        assert!(lines[8].contains('♔'));
    }

    #[test]
    fn test_status_text() {
        let mut game = Game::new();
        assert_eq!(render_status(&game), "White to move");

        game.play(Square::new(5, 6), Square::new(5, 5)).unwrap();
        game.play(Square::new(4, 1), Square::new(4, 3)).unwrap();
        game.play(Square::new(6, 6), Square::new(6, 4)).unwrap();
        game.play(Square::new(3, 0), Square::new(7, 4)).unwrap();

        let status = render_status(&game);
        assert!(status.starts_with("checkmate, Black wins (code 1)"));
        assert!(status.contains("White is in check"));
    }
}
