//! Turn-by-turn game management.
//!
//! The [`Game`] struct drives a game the way a board front end does:
//! - select a piece of the side to move
//! - query its legal destinations
//! - move it, then run [`Game::post_move_actions`] to update check flags,
//!   record the position, and detect the end of the game
//!
//! A pawn reaching its last line is replaced through [`Game::promote`]
//! before the post-move step.

use thiserror::Error;
use tracing::{debug, info};

use crate::movegen::{self, castling_rook, en_passant_capture, rook_destination};
use crate::rules::{self, DrawReason, GameStatus, FIFTY_MOVE_PLIES, REPETITION_LIMIT};
use crate::{BoardError, Piece, PieceId, Position};
use chess_core::{Color, PieceKind, Square};

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The piece belongs to the side not on move.
    #[error("it is {0}'s turn")]
    TurnError(Color),

    /// An empty square was selected, or moves were queried with nothing selected.
    #[error("no piece selected")]
    InvalidSelection,

    #[error("illegal move to {0}")]
    IllegalMove(Square),

    #[error("cannot promote on {square} to {kind}")]
    InvalidPromotion { square: Square, kind: PieceKind },

    #[error("game is over: {0}")]
    GameOver(GameStatus),

    /// A pawn on its last line must be promoted before play continues.
    #[error("pawn on {0} is waiting for promotion")]
    PromotionPending(Square),

    /// A loaded game names an en-passant target that is not an enemy pawn.
    #[error("no capturable pawn on {0}")]
    InvalidEnPassantTarget(Square),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// What a completed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// Kind of the piece taken, including en-passant victims.
    pub captured: Option<PieceKind>,
    pub castled: bool,
    pub en_passant: bool,
    /// A pawn reached its last line and waits for [`Game::promote`].
    pub promotion_pending: bool,
}

/// A chess game with selection, history, and end detection.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) position: Position,
    pub(crate) turn: Color,
    selected: Option<PieceId>,
    /// Kinds captured by each color, indexed by [`Color::index`].
    pub(crate) captured: [Vec<PieceKind>; 2],
    /// Pawn that just advanced two lines and may be taken en passant.
    pub(crate) en_passant: Option<PieceId>,
    /// Position signatures since the last irreversible move.
    history: Vec<String>,
    halfmove_clock: u32,
    pub(crate) status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_position(Position::standard(), Color::White)
    }

    /// Creates a game from an arbitrary position.
    pub fn from_position(position: Position, turn: Color) -> Self {
        Self::from_parts(position, turn, None, [Vec::new(), Vec::new()])
    }

    pub(crate) fn from_parts(
        position: Position,
        turn: Color,
        en_passant: Option<PieceId>,
        captured: [Vec<PieceKind>; 2],
    ) -> Self {
        let mut game = Game {
            position,
            turn,
            selected: None,
            captured,
            en_passant,
            history: Vec::new(),
            halfmove_clock: 0,
            status: GameStatus::Ongoing,
        };
        game.refresh_check_flags();
        game.history.push(game.signature());
        game
    }

    /// Returns the current position.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the status computed by the last [`post_move_actions`](Self::post_move_actions).
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the kinds captured by the given color, in capture order.
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.index()]
    }

    /// Returns the pawn that may currently be captured en passant.
    pub fn en_passant_target(&self) -> Option<&Piece> {
        self.en_passant.and_then(|id| self.position.piece(id))
    }

    /// Returns the selected piece.
    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|id| self.position.piece(id))
    }

    /// Returns the legal destinations of any piece on the board.
    pub fn legal_moves(&self, id: PieceId) -> Vec<Square> {
        movegen::legal_moves(&self.position, id, self.en_passant)
    }

    /// Selects the piece on a square. It must belong to the side to move.
    pub fn select_piece(&mut self, square: Square) -> Result<PieceId, GameError> {
        self.ensure_playable()?;
        let id = self
            .position
            .id_at(square)
            .ok_or(GameError::InvalidSelection)?;
        let color = self
            .position
            .piece(id)
            .map(Piece::color)
            .ok_or(GameError::InvalidSelection)?;
        if color != self.turn {
            return Err(GameError::TurnError(self.turn));
        }
        self.selected = Some(id);
        Ok(id)
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    /// Returns the legal destinations of the selected piece.
    pub fn legal_moves_of_selected(&self) -> Result<Vec<Square>, GameError> {
        let id = self.selected.ok_or(GameError::InvalidSelection)?;
        Ok(self.legal_moves(id))
    }

    /// Moves the selected piece.
    ///
    /// The move is checked against the piece's legal moves before the board
    /// is touched; an illegal destination leaves the game unchanged. On
    /// success the turn passes to the other side and the selection is
    /// cleared. Check flags and end-of-game detection are left to
    /// [`post_move_actions`](Self::post_move_actions).
    pub fn move_selected_to(&mut self, destination: Square) -> Result<MoveOutcome, GameError> {
        self.ensure_playable()?;
        let id = self.selected.ok_or(GameError::InvalidSelection)?;
        if !self.legal_moves(id).contains(&destination) {
            return Err(GameError::IllegalMove(destination));
        }
        let piece = self
            .position
            .piece(id)
            .cloned()
            .ok_or(BoardError::PieceNotPresent(id))?;
        let (mover, from) = (piece.color(), piece.square());
        let previous_target = self.en_passant.take();

        let mut outcome = MoveOutcome {
            piece: piece.kind(),
            color: mover,
            from,
            to: destination,
            captured: None,
            castled: false,
            en_passant: false,
            promotion_pending: false,
        };

        if !self.position.is_empty(destination) {
            let victim = self.position.remove(destination)?;
            debug!(capturer = %piece.kind(), victim = %victim.kind(), square = %destination, "capture");
            self.record_capture(mover, victim.kind(), &mut outcome);
        }

        if piece.kind() == PieceKind::Pawn {
            self.reset_irreversible();
            if let Some(victim) =
                en_passant_capture(&self.position, &piece, destination, previous_target)
            {
                let victim = self.position.remove_piece(victim)?;
                debug!(square = %victim.square(), "en passant capture");
                self.record_capture(mover, victim.kind(), &mut outcome);
                outcome.en_passant = true;
            }
        }

        if piece.kind() == PieceKind::King
            && !piece.has_moved()
            && from.column().abs_diff(destination.column()) == 2
        {
            let step: i8 = if destination.column() > from.column() { 1 } else { -1 };
            if let (Some(rook), Some(rook_to)) = (
                castling_rook(&self.position, from, step),
                rook_destination(destination, step),
            ) {
                self.position.move_piece(rook, rook_to)?;
                debug!(color = %mover, king_to = %destination, rook_to = %rook_to, "castling");
                outcome.castled = true;
            }
        }

        self.position.move_piece(id, destination)?;

        if piece.kind() != PieceKind::Pawn && outcome.captured.is_none() {
            self.halfmove_clock += 1;
        }
        if piece.kind() == PieceKind::Pawn {
            if from.line().abs_diff(destination.line()) == 2 {
                self.en_passant = Some(id);
            }
            outcome.promotion_pending = destination.line() == mover.promotion_line();
        }

        self.turn = self.turn.opposite();
        self.selected = None;

        debug!(
            color = %mover,
            piece = %piece.kind(),
            from = %from,
            to = %destination,
            "move"
        );
        Ok(outcome)
    }

    /// Selects the piece on `from` and moves it to `to`, then runs the
    /// post-move step unless a promotion is pending.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        self.select_piece(from)?;
        let outcome = match self.move_selected_to(to) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.unselect();
                return Err(err);
            }
        };
        if !outcome.promotion_pending {
            self.post_move_actions();
        }
        Ok(outcome)
    }

    /// Finishes a move: refreshes both kings' check flags, records the
    /// position, and evaluates whether the game has ended.
    ///
    /// End conditions are tested in order: checkmate, stalemate, threefold
    /// repetition, the fifty-move rule, insufficient material.
    pub fn post_move_actions(&mut self) -> GameStatus {
        self.refresh_check_flags();
        self.history.push(self.signature());
        self.status = self.evaluate();
        if self.status.is_over() {
            info!(status = %self.status, "game over");
        }
        self.status
    }

    pub(crate) fn evaluate(&self) -> GameStatus {
        if !movegen::has_legal_move(&self.position, self.turn, self.en_passant) {
            let in_check = self
                .position
                .king(self.turn)
                .is_some_and(|king| movegen::is_in_check(&self.position, king));
            return if in_check {
                GameStatus::Checkmate {
                    winner: self.turn.opposite(),
                }
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            };
        }
        if self.repetition_count() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if self.halfmove_clock >= FIFTY_MOVE_PLIES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if rules::is_insufficient_material(&self.position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::Ongoing
    }

    /// Returns the king currently flagged as in check.
    pub fn king_in_check(&self) -> Option<&Piece> {
        self.position
            .pieces_of_kind(PieceKind::King, None)
            .map(|(_, king)| king)
            .find(|king| king.in_check())
    }

    /// Returns the square of a pawn waiting to be promoted.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.position
            .pieces_of_kind(PieceKind::Pawn, None)
            .map(|(_, pawn)| pawn)
            .find(|pawn| pawn.square().line() == pawn.color().promotion_line())
            .map(Piece::square)
    }

    /// Replaces the pawn on `square` with a piece of `kind`.
    ///
    /// The pawn must stand on its promotion line and `kind` must be a queen,
    /// rook, bishop, or knight. The new piece counts as moved.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<PieceId, GameError> {
        let invalid = GameError::InvalidPromotion { square, kind };
        let Some(pawn) = self.position.get(square) else {
            return Err(invalid);
        };
        if pawn.kind() != PieceKind::Pawn
            || square.line() != pawn.color().promotion_line()
            || !kind.is_promotion_target()
        {
            return Err(invalid);
        }
        let color = pawn.color();

        self.position.remove(square)?;
        let id = self
            .position
            .add(Piece::new(kind, color, square).with_moved(true))?;
        self.history.clear();
        debug!(color = %color, kind = %kind, square = %square, "promotion");
        Ok(id)
    }

    /// Returns how many times the current position has occurred since the
    /// last irreversible move.
    pub fn repetition_count(&self) -> usize {
        let Some(current) = self.history.last() else {
            return 0;
        };
        self.history.iter().filter(|s| *s == current).count()
    }

    /// Returns the repetition key of the current position.
    ///
    /// It lists every piece's color, kind, square and number of legal moves
    /// in row-major order, followed by the side to move. Whether a piece has
    /// moved is not part of it.
    pub fn signature(&self) -> String {
        let mut signature = String::new();
        for (id, piece) in self.position.pieces() {
            signature.push_str(&format!(
                "{} {} {} {};",
                piece.color().name(),
                piece.kind().name(),
                piece.square().index(),
                self.legal_moves(id).len()
            ));
        }
        signature.push_str(self.turn.name());
        signature
    }

    fn record_capture(&mut self, capturer: Color, victim: PieceKind, outcome: &mut MoveOutcome) {
        self.captured[capturer.index()].push(victim);
        outcome.captured = Some(victim);
        self.reset_irreversible();
    }

    fn reset_irreversible(&mut self) {
        self.halfmove_clock = 0;
        self.history.clear();
    }

    pub(crate) fn refresh_check_flags(&mut self) {
        let kings: Vec<(PieceId, bool)> = self
            .position
            .pieces_of_kind(PieceKind::King, None)
            .map(|(id, _)| (id, movegen::is_in_check(&self.position, id)))
            .collect();
        for (id, in_check) in kings {
            self.position.set_in_check(id, in_check);
        }
    }

    fn ensure_playable(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        if let Some(square) = self.pending_promotion() {
            return Err(GameError::PromotionPending(square));
        }
        Ok(())
    }
}
