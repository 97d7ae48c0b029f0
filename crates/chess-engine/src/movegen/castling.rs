//! Castling move generation.

use chess_core::{PieceKind, Square};

use super::{is_in_check, would_expose_own_king};
use crate::{PieceId, Position};

/// Returns the king destinations for every castling move currently allowed.
///
/// Castling requires an unmoved king that is not in check and an unmoved rook
/// of the same color on the king's line, with every square between them
/// empty. The king travels two columns toward the rook and may neither pass
/// through nor land on an attacked square.
pub fn castling_moves(position: &Position, king_id: PieceId) -> Vec<Square> {
    let Some(king) = position.piece(king_id) else {
        return Vec::new();
    };
    if king.kind() != PieceKind::King || king.has_moved() || is_in_check(position, king_id) {
        return Vec::new();
    }

    let from = king.square();
    let mut moves = Vec::new();
    for (_, rook) in position.pieces_of_kind(PieceKind::Rook, Some(king.color())) {
        let corner = rook.square();
        if rook.has_moved() || corner.line() != from.line() {
            continue;
        }
        // The rook must lie beyond the king's destination.
        if corner.column().abs_diff(from.column()) < 3 {
            continue;
        }

        let step: i8 = if corner.column() > from.column() { 1 } else { -1 };
        let (low, high) = if step > 0 {
            (from.column(), corner.column())
        } else {
            (corner.column(), from.column())
        };
        if (low + 1..high).any(|column| !position.is_empty(Square::new(column, from.line()))) {
            continue;
        }

        let (Some(through), Some(destination)) = (from.offset(step, 0), from.offset(2 * step, 0))
        else {
            continue;
        };
        if would_expose_own_king(position, king_id, through, None)
            || would_expose_own_king(position, king_id, destination, None)
        {
            continue;
        }
        moves.push(destination);
    }
    moves
}

/// Finds the rook that castles with a king on `from` moving in direction `step`.
pub fn castling_rook(position: &Position, from: Square, step: i8) -> Option<PieceId> {
    let king = position.get(from)?;
    let mut current = from;
    while let Some(next) = current.offset(step, 0) {
        if let Some(id) = position.id_at(next) {
            let piece = position.piece(id)?;
            let usable = piece.kind() == PieceKind::Rook
                && piece.color() == king.color()
                && !piece.has_moved();
            return usable.then_some(id);
        }
        current = next;
    }
    None
}

/// Returns the square the castling rook lands on: next to the king's new
/// square, on the side the king came from.
pub fn rook_destination(king_destination: Square, step: i8) -> Option<Square> {
    king_destination.offset(-step, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Piece;
    use chess_core::Color;

    fn sq(column: u8, line: u8) -> Square {
        Square::new(column, line)
    }

    /// White king and both rooks on their home squares, nothing else but a
    /// black king out of the way.
    fn home() -> (Position, PieceId) {
        let mut position = Position::empty();
        let king = position
            .add(Piece::new(PieceKind::King, Color::White, sq(4, 7)))
            .unwrap();
        position
            .add(Piece::new(PieceKind::Rook, Color::White, sq(0, 7)))
            .unwrap();
        position
            .add(Piece::new(PieceKind::Rook, Color::White, sq(7, 7)))
            .unwrap();
        position
            .add(Piece::new(PieceKind::King, Color::Black, sq(4, 0)))
            .unwrap();
        (position, king)
    }

    #[test]
    fn both_sides_available() {
        let (position, king) = home();
        assert_eq!(castling_moves(&position, king), vec![sq(2, 7), sq(6, 7)]);
    }

    #[test]
    fn moved_rook_or_king_forbids_castling() {
        let (mut position, king) = home();
        let rook = position.id_at(sq(7, 7)).unwrap();
        position.move_piece(rook, sq(7, 6)).unwrap();
        position.move_piece(rook, sq(7, 7)).unwrap();
        assert_eq!(castling_moves(&position, king), vec![sq(2, 7)]);

        position.move_piece(king, sq(4, 6)).unwrap();
        position.move_piece(king, sq(4, 7)).unwrap();
        assert!(castling_moves(&position, king).is_empty());
    }

    #[test]
    fn blocked_path() {
        let (mut position, king) = home();
        position
            .add(Piece::new(PieceKind::Knight, Color::White, sq(1, 7)))
            .unwrap();
        assert_eq!(castling_moves(&position, king), vec![sq(6, 7)]);
    }

    #[test]
    fn no_castling_out_of_or_through_check() {
        let (mut position, king) = home();
        let rook = position
            .add(Piece::new(PieceKind::Rook, Color::Black, sq(5, 0)))
            .unwrap();
        // Attacks the kingside pass-through square.
        assert_eq!(castling_moves(&position, king), vec![sq(2, 7)]);

        position.move_piece(rook, sq(4, 3)).unwrap();
        assert!(castling_moves(&position, king).is_empty());
    }

    #[test]
    fn attacked_rook_square_does_not_matter() {
        let (mut position, king) = home();
        position
            .add(Piece::new(PieceKind::Rook, Color::Black, sq(1, 0)))
            .unwrap();
        // Only column 1 is attacked and the king never crosses it.
        assert_eq!(castling_moves(&position, king), vec![sq(2, 7), sq(6, 7)]);
    }

    #[test]
    fn finds_rook_and_its_landing_square() {
        let (position, _) = home();
        let rook = castling_rook(&position, sq(4, 7), 1).unwrap();
        assert_eq!(position.piece(rook).unwrap().square(), sq(7, 7));
        assert_eq!(rook_destination(sq(6, 7), 1), Some(sq(5, 7)));
        assert_eq!(rook_destination(sq(2, 7), -1), Some(sq(3, 7)));
    }
}
