//! Saved-game record parsing and serialization.
//!
//! A saved game is plain text, one record per line:
//!
//! ```text
//! <color> <kind> <column> <line> <legal-move-count> <true|false>   (one line per piece)
//! <active color>
//! <column> <line>            (en-passant target, or "-")
//! white: <kind> <kind> ...   (kinds captured by White)
//! black: <kind> <kind> ...   (kinds captured by Black)
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::{Color, PieceKind, Square};

/// Errors that can occur when parsing a saved game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid color: expected 'white' or 'black', got '{0}'")]
    InvalidColor(String),

    #[error("invalid piece kind: '{0}'")]
    InvalidKind(String),

    #[error("invalid coordinate: '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid legal move count: '{0}'")]
    InvalidMoveCount(String),

    #[error("invalid moved flag: expected 'true' or 'false', got '{0}'")]
    InvalidMovedFlag(String),

    #[error("invalid en passant target: '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid captured list: '{0}'")]
    InvalidCapturedList(String),

    #[error("missing section: {0}")]
    MissingSection(&'static str),

    #[error("unexpected trailing content: '{0}'")]
    TrailingContent(String),
}

/// One piece line of a saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceRecord {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    /// Number of legal moves the piece had when the game was saved.
    /// Informational only; loading recomputes moves.
    pub legal_moves: usize,
    pub moved: bool,
}

impl PieceRecord {
    fn parse(line: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [color, kind, column, row, legal_moves, moved] = parts.as_slice() else {
            return Err(RecordError::MissingSection("piece record"));
        };

        let legal_moves = legal_moves
            .parse::<usize>()
            .map_err(|_| RecordError::InvalidMoveCount(legal_moves.to_string()))?;
        let moved = match *moved {
            "true" => true,
            "false" => false,
            other => return Err(RecordError::InvalidMovedFlag(other.to_string())),
        };

        Ok(PieceRecord {
            color: color.parse()?,
            kind: kind.parse()?,
            square: parse_square(column, row)?,
            legal_moves,
            moved,
        })
    }
}

impl fmt::Display for PieceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.color.name(),
            self.kind.name(),
            self.square.column(),
            self.square.line(),
            self.legal_moves,
            self.moved
        )
    }
}

/// A parsed saved game.
///
/// This struct holds the raw saved components. The engine is responsible for
/// rebuilding its live state from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Piece lines, in row-major board order.
    pub pieces: Vec<PieceRecord>,
    /// Color to move.
    pub active: Color,
    /// Square of the pawn that may be captured en passant, if any.
    pub en_passant: Option<Square>,
    /// Piece kinds captured by each color, indexed by [`Color::index`].
    pub captured: [Vec<PieceKind>; 2],
}

impl GameRecord {
    /// Sentinel written when there is no en-passant target.
    pub const NO_EN_PASSANT: &'static str = "-";

    /// Parses a saved game.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();

        let mut pieces = Vec::new();
        while let Some(line) = lines.next_if(|l| l.split_whitespace().count() == 6) {
            pieces.push(PieceRecord::parse(line)?);
        }

        let active = lines
            .next()
            .ok_or(RecordError::MissingSection("active color"))?
            .parse::<Color>()?;

        let en_passant = Self::parse_en_passant(
            lines
                .next()
                .ok_or(RecordError::MissingSection("en passant target"))?,
        )?;

        let mut captured: [Vec<PieceKind>; 2] = [Vec::new(), Vec::new()];
        for color in Color::ALL {
            let line = lines
                .next()
                .ok_or(RecordError::MissingSection("captured pieces"))?;
            captured[color.index()] = Self::parse_captured(line, color)?;
        }

        if let Some(extra) = lines.next() {
            return Err(RecordError::TrailingContent(extra.to_string()));
        }

        Ok(GameRecord {
            pieces,
            active,
            en_passant,
            captured,
        })
    }

    fn parse_en_passant(line: &str) -> Result<Option<Square>, RecordError> {
        if line == Self::NO_EN_PASSANT {
            return Ok(None);
        }
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [column, row] => parse_square(column, row)
                .map(Some)
                .map_err(|_| RecordError::InvalidEnPassant(line.to_string())),
            _ => Err(RecordError::InvalidEnPassant(line.to_string())),
        }
    }

    fn parse_captured(line: &str, color: Color) -> Result<Vec<PieceKind>, RecordError> {
        let prefix = format!("{}:", color.name());
        let rest = line
            .strip_prefix(&prefix)
            .ok_or_else(|| RecordError::InvalidCapturedList(line.to_string()))?;
        rest.split_whitespace().map(str::parse).collect()
    }

    /// Returns the kinds captured by the given color.
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.index()]
    }

    /// Converts the record back to save-file text.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            writeln!(f, "{}", piece)?;
        }
        writeln!(f, "{}", self.active.name())?;
        match self.en_passant {
            Some(sq) => writeln!(f, "{} {}", sq.column(), sq.line())?,
            None => writeln!(f, "{}", Self::NO_EN_PASSANT)?,
        }
        for color in Color::ALL {
            write!(f, "{}:", color.name())?;
            for kind in self.captured_by(color) {
                write!(f, " {}", kind.name())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_square(column: &str, line: &str) -> Result<Square, RecordError> {
    let parse = |s: &str| {
        s.parse::<i8>()
            .map_err(|_| RecordError::InvalidCoordinate(s.to_string()))
    };
    let (c, l) = (parse(column)?, parse(line)?);
    Square::try_new(c, l).ok_or_else(|| RecordError::InvalidCoordinate(format!("{} {}", c, l)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
black king 4 0 5 false
white pawn 3 3 1 true
black pawn 4 3 2 true
white king 4 7 5 false
white
4 3
white: knight
black: pawn pawn
";

    #[test]
    fn parse_sample() {
        let record = GameRecord::parse(SAMPLE).unwrap();
        assert_eq!(record.pieces.len(), 4);
        assert_eq!(
            record.pieces[1],
            PieceRecord {
                color: Color::White,
                kind: PieceKind::Pawn,
                square: Square::new(3, 3),
                legal_moves: 1,
                moved: true,
            }
        );
        assert_eq!(record.active, Color::White);
        assert_eq!(record.en_passant, Some(Square::new(4, 3)));
        assert_eq!(record.captured_by(Color::White), &[PieceKind::Knight]);
        assert_eq!(
            record.captured_by(Color::Black),
            &[PieceKind::Pawn, PieceKind::Pawn]
        );
    }

    #[test]
    fn text_roundtrip() {
        let record = GameRecord::parse(SAMPLE).unwrap();
        assert_eq!(record.to_text(), SAMPLE);
    }

    #[test]
    fn empty_captured_lists_and_no_en_passant() {
        let text = "white king 4 7 0 true\nblack king 4 0 0 true\nblack\n-\nwhite:\nblack:\n";
        let record = GameRecord::parse(text).unwrap();
        assert_eq!(record.active, Color::Black);
        assert_eq!(record.en_passant, None);
        assert!(record.captured_by(Color::White).is_empty());
        assert_eq!(record.to_text(), text);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = "\nwhite king 4 7 0 true\n\nwhite\n-\nwhite:\nblack:\n\n";
        assert!(GameRecord::parse(text).is_ok());
    }

    #[test]
    fn invalid_piece_fields() {
        assert!(matches!(
            GameRecord::parse("green king 4 7 0 true\nwhite\n-\nwhite:\nblack:"),
            Err(RecordError::InvalidColor(_))
        ));
        assert!(matches!(
            GameRecord::parse("white dragon 4 7 0 true\nwhite\n-\nwhite:\nblack:"),
            Err(RecordError::InvalidKind(_))
        ));
        assert!(matches!(
            GameRecord::parse("white king 9 7 0 true\nwhite\n-\nwhite:\nblack:"),
            Err(RecordError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            GameRecord::parse("white king 4 7 x true\nwhite\n-\nwhite:\nblack:"),
            Err(RecordError::InvalidMoveCount(_))
        ));
        assert!(matches!(
            GameRecord::parse("white king 4 7 0 yes\nwhite\n-\nwhite:\nblack:"),
            Err(RecordError::InvalidMovedFlag(_))
        ));
    }

    #[test]
    fn invalid_sections() {
        assert!(matches!(
            GameRecord::parse(""),
            Err(RecordError::MissingSection("active color"))
        ));
        assert!(matches!(
            GameRecord::parse("white"),
            Err(RecordError::MissingSection("en passant target"))
        ));
        assert!(matches!(
            GameRecord::parse("white\n3 9\nwhite:\nblack:"),
            Err(RecordError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            GameRecord::parse("white\n-\nblack:\nwhite:"),
            Err(RecordError::InvalidCapturedList(_))
        ));
        assert!(matches!(
            GameRecord::parse("white\n-\nwhite:\nblack:\nextra"),
            Err(RecordError::TrailingContent(_))
        ));
    }

    #[test]
    fn record_error_display() {
        let err = RecordError::InvalidColor("green".to_string());
        assert!(err.to_string().contains("green"));

        let err = RecordError::MissingSection("active color");
        assert!(err.to_string().contains("active color"));
    }
}
