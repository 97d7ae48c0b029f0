//! Pieces on the board and their raw move generation.

use chess_core::{Color, PieceKind, Square};

use crate::Position;

/// Stable handle to a piece stored in a [`Position`].
///
/// A handle stays valid while the piece is on the board; relocating the piece
/// does not change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    /// Returns the arena slot of this handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

const ROOK_RAYS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

// Clockwise, starting toward line 0.
const QUEEN_RAYS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A chess piece standing on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    moved: bool,
    /// Only ever set on kings.
    in_check: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            moved: false,
            in_check: false,
        }
    }

    /// Returns the piece with its "has moved" flag set as given.
    pub const fn with_moved(mut self, moved: bool) -> Self {
        self.moved = moved;
        self
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns true once the piece has been moved.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns true if this is a king that was in check after the last move.
    #[inline]
    pub const fn in_check(&self) -> bool {
        self.in_check
    }

    /// Returns the line step this piece would advance by as a pawn.
    #[inline]
    pub const fn direction(&self) -> i8 {
        self.color.pawn_direction()
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn set_moved(&mut self) {
        self.moved = true;
    }

    pub(crate) fn set_in_check(&mut self, in_check: bool) {
        self.in_check = in_check && self.kind == PieceKind::King;
    }

    /// Returns the squares this piece can reach, ignoring whether the move
    /// would leave its own king in check.
    ///
    /// The order is fixed per kind, so the same position always yields the
    /// same list.
    pub fn possible_moves(&self, position: &Position) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(position),
            PieceKind::Knight => self.step_moves(position, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.ray_moves(position, &BISHOP_RAYS),
            PieceKind::Rook => self.ray_moves(position, &ROOK_RAYS),
            PieceKind::Queen => self.ray_moves(position, &QUEEN_RAYS),
            PieceKind::King => self.step_moves(position, &KING_OFFSETS),
        }
    }

    fn pawn_moves(&self, position: &Position) -> Vec<Square> {
        let dir = self.direction();
        let mut moves = Vec::with_capacity(4);

        for dc in [1, -1] {
            if let Some(target) = self.square.offset(dc, dir) {
                if position.get(target).is_some_and(|p| p.color != self.color) {
                    moves.push(target);
                }
            }
        }

        if let Some(one) = self.square.offset(0, dir) {
            if position.is_empty(one) {
                moves.push(one);
                if !self.moved {
                    if let Some(two) = self.square.offset(0, 2 * dir) {
                        if position.is_empty(two) {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        moves
    }

    fn step_moves(&self, position: &Position, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dc, dl)| self.square.offset(dc, dl))
            .filter(|&target| position.get(target).is_none_or(|p| p.color != self.color))
            .collect()
    }

    fn ray_moves(&self, position: &Position, rays: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(dc, dl) in rays {
            let mut current = self.square;
            while let Some(target) = current.offset(dc, dl) {
                match position.get(target) {
                    None => moves.push(target),
                    Some(p) if p.color != self.color => {
                        moves.push(target);
                        break;
                    }
                    Some(_) => break,
                }
                current = target;
            }
        }
        moves
    }
}
