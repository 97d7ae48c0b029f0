//! En-passant capture detection.

use chess_core::{PieceKind, Square};

use crate::{Piece, PieceId, Position};

/// Returns the destination square and the captured pawn if `pawn` may take
/// the current en-passant target.
///
/// The target must be an enemy pawn on the same line as `pawn`, one column
/// away. The capture lands on the target's column, one step forward.
pub fn en_passant_move(
    position: &Position,
    pawn: &Piece,
    en_passant: Option<PieceId>,
) -> Option<(Square, PieceId)> {
    if pawn.kind() != PieceKind::Pawn {
        return None;
    }
    let target_id = en_passant?;
    let target = position.piece(target_id)?;
    if target.kind() != PieceKind::Pawn || target.color() == pawn.color() {
        return None;
    }

    let (from, victim) = (pawn.square(), target.square());
    if victim.line() != from.line() || victim.column().abs_diff(from.column()) != 1 {
        return None;
    }

    let destination = victim.offset(0, pawn.direction())?;
    position
        .is_empty(destination)
        .then_some((destination, target_id))
}

/// Returns the pawn removed by moving `pawn` to `destination`, when that
/// move is an en-passant capture.
pub fn en_passant_capture(
    position: &Position,
    pawn: &Piece,
    destination: Square,
    en_passant: Option<PieceId>,
) -> Option<PieceId> {
    en_passant_move(position, pawn, en_passant)
        .filter(|&(square, _)| square == destination)
        .map(|(_, victim)| victim)
}
