//! Converting games to and from saved records.

use chess_core::{GameRecord, PieceKind, PieceRecord};

use crate::{Game, GameError, Piece, Position};

impl Game {
    /// Captures the game as a [`GameRecord`].
    ///
    /// Pieces are listed in row-major board order, each with its current
    /// number of legal moves.
    pub fn to_record(&self) -> GameRecord {
        let pieces = self
            .position
            .pieces()
            .map(|(id, piece)| PieceRecord {
                color: piece.color(),
                kind: piece.kind(),
                square: piece.square(),
                legal_moves: self.legal_moves(id).len(),
                moved: piece.has_moved(),
            })
            .collect();

        GameRecord {
            pieces,
            active: self.turn,
            en_passant: self.en_passant_target().map(Piece::square),
            captured: self.captured.clone(),
        }
    }

    /// Rebuilds a game from a record.
    ///
    /// Check flags are recomputed, the loaded position seeds the repetition
    /// history, and the status is evaluated, so a saved checkmate or
    /// stalemate loads as finished. The half-move clock starts at zero.
    pub fn from_record(record: &GameRecord) -> Result<Self, GameError> {
        let mut position = Position::empty();
        for piece in &record.pieces {
            position.add(Piece::new(piece.kind, piece.color, piece.square).with_moved(piece.moved))?;
        }

        let en_passant = match record.en_passant {
            None => None,
            Some(square) => {
                let id = position
                    .id_at(square)
                    .filter(|&id| {
                        position.piece(id).is_some_and(|p| {
                            p.kind() == PieceKind::Pawn && p.color() != record.active
                        })
                    })
                    .ok_or(GameError::InvalidEnPassantTarget(square))?;
                Some(id)
            }
        };

        let mut game = Game::from_parts(
            position,
            record.active,
            en_passant,
            record.captured.clone(),
        );
        game.status = game.evaluate();
        Ok(game)
    }
}
