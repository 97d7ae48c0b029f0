//! Board square representation.

use serde::Serialize;
use std::fmt;

/// A square on the board, addressed by `(column, line)`.
///
/// Both coordinates lie in `0..=7`. Column 0 is the leftmost file as White
/// sees the board; line 0 is Black's back rank (the top row on screen) and
/// line 7 is White's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    column: u8,
    line: u8,
}

impl Square {
    /// Number of squares along each edge.
    pub const SIZE: u8 = 8;

    /// Creates a square from column and line.
    ///
    /// # Panics
    /// Panics if either coordinate is outside `0..=7`.
    #[inline]
    pub const fn new(column: u8, line: u8) -> Self {
        assert!(column < Self::SIZE && line < Self::SIZE, "square out of range");
        Square { column, line }
    }

    /// Creates a square from signed coordinates, or `None` when off the board.
    #[inline]
    pub const fn try_new(column: i8, line: i8) -> Option<Self> {
        if column < 0 || line < 0 || column >= Self::SIZE as i8 || line >= Self::SIZE as i8 {
            None
        } else {
            Some(Square {
                column: column as u8,
                line: line as u8,
            })
        }
    }

    /// Creates a square from its row-major index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                column: index % 8,
                line: index / 8,
            })
        } else {
            None
        }
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Returns the line (0-7).
    #[inline]
    pub const fn line(self) -> u8 {
        self.line
    }

    /// Returns the row-major index (`line * 8 + column`).
    #[inline]
    pub const fn index(self) -> usize {
        self.line as usize * 8 + self.column as usize
    }

    /// Returns the square shifted by the given deltas, or `None` when off the board.
    #[inline]
    pub const fn offset(self, dc: i8, dl: i8) -> Option<Self> {
        Self::try_new(self.column as i8 + dc, self.line as i8 + dl)
    }

    /// Returns true for light squares. The corner `(0, 0)` is light.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.column + self.line) % 2 == 0
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.column, self.line)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.line)
    }
}
