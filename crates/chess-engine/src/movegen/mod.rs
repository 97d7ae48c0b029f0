//! Legal move generation.
//!
//! Each piece knows its raw moves ([`crate::Piece::possible_moves`]). This module
//! filters them down to moves that do not leave the mover's own king in
//! check, and adds the special moves that depend on game state: castling and
//! en passant.
//!
//! Check safety is decided by simulation. The move is played on a cloned
//! [`Position`] and the king is tested for attack there; the real board is
//! never touched.

mod castling;
mod en_passant;

use chess_core::{Color, PieceKind, Square};

use crate::{PieceId, Position};

pub use castling::{castling_moves, castling_rook, rook_destination};
pub use en_passant::{en_passant_capture, en_passant_move};

/// Returns every legal destination for a piece.
///
/// `en_passant` is the pawn that may currently be captured en passant, if
/// any. A handle that is not on the board has no moves.
pub fn legal_moves(position: &Position, id: PieceId, en_passant: Option<PieceId>) -> Vec<Square> {
    let Some(piece) = position.piece(id) else {
        return Vec::new();
    };

    let mut moves: Vec<Square> = piece
        .possible_moves(position)
        .into_iter()
        .filter(|&dest| !would_expose_own_king(position, id, dest, en_passant))
        .collect();

    match piece.kind() {
        PieceKind::Pawn => {
            if let Some((dest, _)) = en_passant_move(position, piece, en_passant) {
                if !would_expose_own_king(position, id, dest, en_passant) {
                    moves.push(dest);
                }
            }
        }
        PieceKind::King => moves.extend(castling_moves(position, id)),
        _ => {}
    }

    moves
}

/// Returns true if moving the piece to `destination` would leave its own
/// king attacked.
///
/// The simulation removes whatever stands on the destination, and the
/// en-passant victim when the move is an en-passant capture. A side without
/// a king is never considered exposed.
pub fn would_expose_own_king(
    position: &Position,
    id: PieceId,
    destination: Square,
    en_passant: Option<PieceId>,
) -> bool {
    let Some(piece) = position.piece(id) else {
        return false;
    };

    let mut scratch = position.clone();
    if let Some(victim) = en_passant_capture(position, piece, destination, en_passant) {
        scratch.take_piece(victim);
    }
    scratch.take(destination);
    scratch.relocate(id, destination);

    scratch
        .king(piece.color())
        .is_some_and(|king| is_in_check(&scratch, king))
}

/// Returns true if the given king is attacked by any enemy piece.
pub fn is_in_check(position: &Position, king: PieceId) -> bool {
    position
        .piece(king)
        .is_some_and(|k| is_attacked(position, k.square(), k.color().opposite()))
}

/// Returns true if some piece of color `by` has `square` among its raw moves.
///
/// Pawns only reach diagonals holding an enemy, so this is only meaningful
/// for occupied squares.
fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    position
        .pieces_of(by)
        .any(|(_, p)| p.possible_moves(position).contains(&square))
}

/// Returns true if the side has at least one legal move.
pub fn has_legal_move(position: &Position, color: Color, en_passant: Option<PieceId>) -> bool {
    position
        .pieces_of(color)
        .any(|(id, _)| !legal_moves(position, id, en_passant).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Piece;

    fn sq(column: u8, line: u8) -> Square {
        Square::new(column, line)
    }

    fn add(position: &mut Position, kind: PieceKind, color: Color, square: Square) -> PieceId {
        position.add(Piece::new(kind, color, square)).unwrap()
    }

    #[test]
    fn opening_moves() {
        let position = Position::standard();
        let pawn = position.id_at(sq(4, 6)).unwrap();
        assert_eq!(legal_moves(&position, pawn, None), vec![sq(4, 5), sq(4, 4)]);

        let knight = position.id_at(sq(1, 7)).unwrap();
        assert_eq!(legal_moves(&position, knight, None), vec![sq(0, 5), sq(2, 5)]);

        let total: usize = position
            .pieces_of(Color::White)
            .map(|(id, _)| legal_moves(&position, id, None).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut position = Position::empty();
        add(&mut position, PieceKind::King, Color::White, sq(4, 7));
        let bishop = add(&mut position, PieceKind::Bishop, Color::White, sq(4, 5));
        add(&mut position, PieceKind::Rook, Color::Black, sq(4, 0));
        add(&mut position, PieceKind::King, Color::Black, sq(0, 0));

        assert!(legal_moves(&position, bishop, None).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut position = Position::empty();
        let king = add(&mut position, PieceKind::King, Color::White, sq(4, 7));
        add(&mut position, PieceKind::Rook, Color::Black, sq(3, 0));
        add(&mut position, PieceKind::King, Color::Black, sq(7, 0));

        let moves = legal_moves(&position, king, None);
        assert!(!moves.iter().any(|s| s.column() == 3));
        assert_eq!(moves, vec![sq(4, 6), sq(5, 6), sq(5, 7)]);
    }

    #[test]
    fn capturing_the_attacker_resolves_check() {
        let mut position = Position::empty();
        let king = add(&mut position, PieceKind::King, Color::White, sq(4, 7));
        add(&mut position, PieceKind::Queen, Color::Black, sq(4, 6));
        add(&mut position, PieceKind::Rook, Color::Black, sq(0, 0));
        add(&mut position, PieceKind::King, Color::Black, sq(7, 0));

        assert!(is_in_check(&position, king));
        assert_eq!(legal_moves(&position, king, None), vec![sq(4, 6)]);
    }

    #[test]
    fn pawn_gives_check_diagonally_only() {
        let mut position = Position::empty();
        let king = add(&mut position, PieceKind::King, Color::White, sq(4, 7));
        let pawn = add(&mut position, PieceKind::Pawn, Color::Black, sq(4, 6));
        add(&mut position, PieceKind::King, Color::Black, sq(0, 0));
        assert!(!is_in_check(&position, king));

        position.move_piece(pawn, sq(3, 6)).unwrap();
        assert!(is_in_check(&position, king));
    }

    #[test]
    fn no_king_means_never_exposed() {
        let mut position = Position::empty();
        let rook = add(&mut position, PieceKind::Rook, Color::White, sq(0, 7));
        add(&mut position, PieceKind::Queen, Color::Black, sq(7, 0));
        assert!(!would_expose_own_king(&position, rook, sq(0, 0), None));
        assert_eq!(legal_moves(&position, rook, None).len(), 14);
    }

    #[test]
    fn en_passant_discovering_check_is_illegal() {
        // King, capturing pawn, and victim share a line with an enemy rook.
        let mut position = Position::empty();
        add(&mut position, PieceKind::King, Color::White, sq(0, 3));
        let white = add(&mut position, PieceKind::Pawn, Color::White, sq(3, 3));
        let black = add(&mut position, PieceKind::Pawn, Color::Black, sq(4, 3));
        add(&mut position, PieceKind::Rook, Color::Black, sq(7, 3));
        add(&mut position, PieceKind::King, Color::Black, sq(7, 0));

        let moves = legal_moves(&position, white, Some(black));
        assert!(!moves.contains(&sq(4, 2)));
        assert_eq!(moves, vec![sq(3, 2)]);
    }

    #[test]
    fn en_passant_listed_after_regular_moves() {
        let mut position = Position::empty();
        add(&mut position, PieceKind::King, Color::White, sq(4, 7));
        let white = add(&mut position, PieceKind::Pawn, Color::White, sq(3, 3));
        let black = add(&mut position, PieceKind::Pawn, Color::Black, sq(2, 3));
        add(&mut position, PieceKind::King, Color::Black, sq(4, 0));

        assert_eq!(
            legal_moves(&position, white, Some(black)),
            vec![sq(3, 2), sq(2, 2)]
        );
        assert_eq!(legal_moves(&position, white, None), vec![sq(3, 2)]);
    }

    #[test]
    fn stalemated_side_has_no_moves() {
        let mut position = Position::empty();
        let king = add(&mut position, PieceKind::King, Color::Black, sq(0, 0));
        add(&mut position, PieceKind::Queen, Color::White, sq(1, 2));
        add(&mut position, PieceKind::King, Color::White, sq(2, 1));

        assert!(!is_in_check(&position, king));
        assert!(!has_legal_move(&position, Color::Black, None));
        assert!(has_legal_move(&position, Color::White, None));
    }
}
