//! Board state: which piece stands on which square.

use chess_core::{Color, PieceKind, Square};
use thiserror::Error;

use crate::{Piece, PieceId};

/// Errors raised by direct board manipulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    OccupiedSquare(Square),

    #[error("no piece to remove on {0}")]
    EmptySquareRemoval(Square),

    #[error("piece {0:?} is not on the board")]
    PieceNotPresent(PieceId),

    #[error("piece is already on {0}")]
    NullMove(Square),
}

const BACK_LINE: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The pieces on the board.
///
/// Pieces live in an arena and are addressed by [`PieceId`]; a 64-entry grid
/// maps each square to the piece standing on it. A piece's own square and its
/// grid entry are always kept in agreement.
///
/// Cloning a position yields an independent copy, which is how hypothetical
/// moves are tried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    arena: Vec<Option<Piece>>,
    grid: [Option<PieceId>; 64],
}

impl Position {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Position {
            arena: Vec::with_capacity(32),
            grid: [None; 64],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut position = Self::empty();
        for color in [Color::Black, Color::White] {
            let back = color.back_line();
            let pawns = (back as i8 + color.pawn_direction()) as u8;
            for (column, kind) in (0u8..).zip(BACK_LINE) {
                position.place(Piece::new(kind, color, Square::new(column, back)));
                position.place(Piece::new(PieceKind::Pawn, color, Square::new(column, pawns)));
            }
        }
        position
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.id_at(square).and_then(|id| self.piece(id))
    }

    /// Returns the handle of the piece on a square.
    #[inline]
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.index()]
    }

    /// Returns the piece behind a handle, if it is still on the board.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.arena.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.grid[square.index()].is_none()
    }

    /// Returns the number of pieces on the board.
    pub fn len(&self) -> usize {
        self.grid.iter().flatten().count()
    }

    /// Places a piece on its square.
    pub fn add(&mut self, piece: Piece) -> Result<PieceId, BoardError> {
        if !self.is_empty(piece.square()) {
            return Err(BoardError::OccupiedSquare(piece.square()));
        }
        Ok(self.place(piece))
    }

    fn place(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.arena.len() as u16);
        self.grid[piece.square().index()] = Some(id);
        self.arena.push(Some(piece));
        id
    }

    /// Removes and returns the piece on a square.
    pub fn remove(&mut self, square: Square) -> Result<Piece, BoardError> {
        self.take(square)
            .ok_or(BoardError::EmptySquareRemoval(square))
    }

    /// Removes and returns a specific piece.
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece, BoardError> {
        self.take_piece(id).ok_or(BoardError::PieceNotPresent(id))
    }

    /// Moves a piece to an empty square and marks it as moved.
    ///
    /// Nothing is changed when the move is rejected.
    pub fn move_piece(&mut self, id: PieceId, destination: Square) -> Result<(), BoardError> {
        let piece = self.piece(id).ok_or(BoardError::PieceNotPresent(id))?;
        if piece.square() == destination {
            return Err(BoardError::NullMove(destination));
        }
        if !self.is_empty(destination) {
            return Err(BoardError::OccupiedSquare(destination));
        }
        self.relocate(id, destination);
        Ok(())
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        let id = self.grid[square.index()]?;
        self.take_piece(id)
    }

    pub(crate) fn take_piece(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.arena.get_mut(id.index())?.take()?;
        self.grid[piece.square().index()] = None;
        Some(piece)
    }

    /// Moves a piece without validating the destination. Whatever stood on
    /// the destination is dropped from the grid, so callers clear it first.
    pub(crate) fn relocate(&mut self, id: PieceId, destination: Square) {
        let Some(piece) = self.piece_mut(id) else {
            return;
        };
        let from = piece.square();
        piece.set_square(destination);
        piece.set_moved();
        self.grid[from.index()] = None;
        self.grid[destination.index()] = Some(id);
    }

    /// Iterates over all pieces in row-major square order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.grid
            .iter()
            .flatten()
            .filter_map(|&id| self.piece(id).map(|piece| (id, piece)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color() == color)
    }

    /// Iterates over the pieces of one kind, optionally restricted to a color.
    pub fn pieces_of_kind(
        &self,
        kind: PieceKind,
        color: Option<Color>,
    ) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.kind() == kind && color.is_none_or(|c| p.color() == c))
    }

    /// Returns the king of the given color, if it is on the board.
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.pieces_of_kind(PieceKind::King, Some(color))
            .map(|(id, _)| id)
            .next()
    }

    pub(crate) fn set_in_check(&mut self, id: PieceId, in_check: bool) {
        if let Some(piece) = self.piece_mut(id) {
            piece.set_in_check(in_check);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}
