//! Game termination rules.
//!
//! This module defines how a game ends ([`GameStatus`], [`DrawReason`]) and the
//! position-only checks used to detect it. Checks that need the move history
//! (repetition, the fifty-move rule) are driven by [`Game`](crate::Game).

use serde::Serialize;
use std::fmt;

use chess_core::{Color, PieceKind};

use crate::Position;

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of the same position that end the game in a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// The side to move has no legal move but is not in check.
    Stalemate,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// 100 plies passed without a capture or pawn move.
    FiftyMoveRule,
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
}

/// Status of a game after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Ongoing,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true once the game has ended.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Returns the winner, if the game ended in checkmate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns the numeric status code shown to front ends.
    ///
    /// | code | status |
    /// |------|--------|
    /// | 0 | ongoing |
    /// | 1 | checkmate |
    /// | 2 | stalemate |
    /// | 3 | threefold repetition |
    /// | 4 | fifty-move rule |
    /// | 5 | insufficient material |
    pub const fn code(self) -> u8 {
        match self {
            GameStatus::Ongoing => 0,
            GameStatus::Checkmate { .. } => 1,
            GameStatus::Draw(DrawReason::Stalemate) => 2,
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => 3,
            GameStatus::Draw(DrawReason::FiftyMoveRule) => 4,
            GameStatus::Draw(DrawReason::InsufficientMaterial) => 5,
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::InsufficientMaterial => "insufficient material",
        };
        f.write_str(text)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Returns true if neither side has enough material to mate.
///
/// Three cases are recognised: two bare kings, king and a single knight
/// against a bare king, and positions where every non-king piece is a bishop
/// and all bishops stand on squares of the same shade.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut knights = 0usize;
    let mut light_bishops = 0usize;
    let mut dark_bishops = 0usize;

    for (_, piece) in position.pieces() {
        match piece.kind() {
            PieceKind::King => {}
            PieceKind::Knight => knights += 1,
            PieceKind::Bishop if piece.square().is_light() => light_bishops += 1,
            PieceKind::Bishop => dark_bishops += 1,
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match knights {
        0 => light_bishops == 0 || dark_bishops == 0,
        1 => light_bishops == 0 && dark_bishops == 0,
        _ => false,
    }
}
