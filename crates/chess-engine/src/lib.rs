//! Chess rules engine.
//!
//! This crate provides:
//! - [`Piece`] - a piece on the board and its raw move generation
//! - [`Position`] - which piece stands where, with checked board edits
//! - [`movegen`] - legal move filtering, castling and en passant
//! - [`Game`] - selection, moves, promotion, and end-of-game detection
//! - [`rules`] - game status and the insufficient-material test
//!
//! # Architecture
//!
//! Pieces live in an arena inside [`Position`] and are addressed by
//! [`PieceId`], with a 64-entry grid mapping squares to pieces. Whether a
//! move would leave the king in check is decided by playing it on a cloned
//! position.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! game.select_piece(Square::new(4, 6)).unwrap();
//! assert_eq!(
//!     game.legal_moves_of_selected().unwrap(),
//!     vec![Square::new(4, 5), Square::new(4, 4)]
//! );
//! game.move_selected_to(Square::new(4, 4)).unwrap();
//! assert_eq!(game.post_move_actions(), GameStatus::Ongoing);
//! ```

mod game;
pub mod movegen;
mod piece;
mod position;
pub mod rules;
mod save;

pub use game::{Game, GameError, MoveOutcome};
pub use movegen::{is_in_check, legal_moves, would_expose_own_king};
pub use piece::{Piece, PieceId};
pub use position::{BoardError, Position};
pub use rules::{DrawReason, GameStatus};
