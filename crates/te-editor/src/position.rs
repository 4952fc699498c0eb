//! Screen coordinates and movement directions.
//!
//! All coordinates are **0-indexed**. Row 0 is the first visual row of the
//! document, column 0 the first cell of a row. Rows are *visual*: a logical
//! line longer than the wrap width occupies several rows.
//!
//! Columns count bytes. A byte is one cell; there is no width table.
//!
//! Display layers should convert to 1-indexed for the user; that conversion
//! never belongs here.

use std::fmt;

// ---------------------------------------------------------------------------
// RowCol
// ---------------------------------------------------------------------------

/// A visual position: (row, column), both 0-indexed.
///
/// # Ordering
///
/// Lexicographic: row first, then column, which matches document order for
/// positions produced by the same wrap width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RowCol {
    pub row: usize,
    pub col: usize,
}

impl RowCol {
    /// Row 0, column 0.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Debug for RowCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowCol({}:{})", self.row, self.col)
    }
}

impl fmt::Display for RowCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed, the way a status line shows it.
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Vertical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
