//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`GameRecord`] for the saved-game text format

mod color;
mod piece;
mod record;
mod square;

pub use color::Color;
pub use piece::PieceKind;
pub use record::{GameRecord, PieceRecord, RecordError};
pub use square::Square;
