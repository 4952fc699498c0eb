//! Cursor — offset tracking, soft-wrap mapping, and line-aware movement.
//!
//! The cursor is a byte offset into a [`PieceTable`] plus a remembered
//! *desired column* for vertical movement. It does not own or borrow the
//! table; the table is passed to every method that needs to look at text.
//!
//! # Soft wrap
//!
//! A visual row ends at a newline or after `width` columns, whichever comes
//! first. Walking the document byte by byte:
//!
//! ```text
//! col += 1
//! if byte == '\n' || col == width { row += 1; col = 0 }
//! ```
//!
//! So with `width = 4` the line `"abcd"` fills row 0 and the offset just
//! after `'d'` already sits at row 1, column 0. A `width` of 0 turns soft
//! wrap off.
//!
//! # Desired column
//!
//! Vertical moves aim for the column the cursor had when it last moved
//! horizontally (or was edited through). Passing through a short line clamps
//! the *offset* but not the remembered column, so the next long line gets the
//! original column back. The column here is logical: bytes since the start of
//! the line, independent of wrap width.

use crate::error::{EditError, Result};
use crate::piece_table::PieceTable;
use crate::position::{Direction, RowCol};

// ---------------------------------------------------------------------------
// Offset <-> row/column
// ---------------------------------------------------------------------------

/// Step a visual position over one consumed byte.
#[inline]
const fn advance(pos: &mut RowCol, byte: u8, width: usize) {
    pos.col += 1;
    if byte == b'\n' || pos.col == width {
        pos.row += 1;
        pos.col = 0;
    }
}

/// Visual `(row, col)` of `offset` when the document is wrapped at `width`.
///
/// # Errors
///
/// Returns [`EditError::OutOfRange`] if `offset > table.len()`.
pub fn offset_to_rowcol(table: &PieceTable, offset: usize, width: usize) -> Result<RowCol> {
    let mut pos = RowCol::ZERO;
    for byte in table.slice(0, offset)? {
        advance(&mut pos, byte, width);
    }
    Ok(pos)
}

/// The offset whose visual position under `width` is exactly `pos`.
///
/// # Errors
///
/// Returns [`EditError::NoSuchPosition`] if the row does not exist or the
/// column lies past the end of that row.
pub fn rowcol_to_offset(table: &PieceTable, pos: RowCol, width: usize) -> Result<usize> {
    let mut at = RowCol::ZERO;
    if at == pos {
        return Ok(0);
    }
    // Positions grow strictly with the offset, so we can stop once past.
    for (i, byte) in table.bytes().enumerate() {
        advance(&mut at, byte, width);
        if at == pos {
            return Ok(i + 1);
        }
        if at > pos {
            break;
        }
    }
    Err(EditError::NoSuchPosition {
        row: pos.row,
        col: pos.col,
    })
}

// ---------------------------------------------------------------------------
// Line boundaries
// ---------------------------------------------------------------------------

/// Offset of the first byte of the logical line containing `offset`.
///
/// # Errors
///
/// Returns [`EditError::OutOfRange`] if `offset > table.len()`.
pub fn line_start(table: &PieceTable, offset: usize) -> Result<usize> {
    check_offset(table, offset)?;
    Ok(start_of_line(table, offset))
}

/// Offset of the newline ending the logical line containing `offset`, or
/// `table.len()` on the last line.
///
/// # Errors
///
/// Returns [`EditError::OutOfRange`] if `offset > table.len()`.
pub fn line_end(table: &PieceTable, offset: usize) -> Result<usize> {
    check_offset(table, offset)?;
    Ok(end_of_line(table, offset))
}

const fn check_offset(table: &PieceTable, offset: usize) -> Result<()> {
    if offset > table.len() {
        return Err(EditError::offset(offset, table.len()));
    }
    Ok(())
}

fn start_of_line(table: &PieceTable, offset: usize) -> usize {
    table.rfind_byte(b'\n', offset).map_or(0, |nl| nl + 1)
}

fn end_of_line(table: &PieceTable, offset: usize) -> usize {
    table.find_byte(b'\n', offset).unwrap_or(table.len())
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// A cursor in a piece table.
///
/// Lightweight value type: an offset and a desired column. Movement clamps
/// into the document, so a cursor left stale by an unadjusted edit snaps back
/// in range on its next move rather than indexing past the end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Byte offset in `0..=len`.
    offset: usize,

    /// Column within the logical line that vertical moves aim for.
    desired_col: usize,
}

impl Cursor {
    /// A cursor at the start of the document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            desired_col: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The column vertical moves aim for.
    #[inline]
    #[must_use]
    pub const fn desired_col(&self) -> usize {
        self.desired_col
    }

    /// Column of the cursor within its logical line.
    #[must_use]
    pub fn line_col(&self, table: &PieceTable) -> usize {
        let offset = self.offset.min(table.len());
        offset - start_of_line(table, offset)
    }

    /// Visual position of the cursor under `width`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor was left past the end
    /// of the document by an edit it was not told about.
    pub fn rowcol(&self, table: &PieceTable, width: usize) -> Result<RowCol> {
        offset_to_rowcol(table, self.offset, width)
    }

    // -- Direct positioning -------------------------------------------------

    /// Place the cursor at `offset` and remember its column.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `offset > table.len()`. The
    /// cursor does not move.
    pub fn set_offset(&mut self, offset: usize, table: &PieceTable) -> Result<()> {
        check_offset(table, offset)?;
        self.offset = offset;
        self.reset_desired_col(table);
        Ok(())
    }

    /// Forget the remembered column and use the current one.
    pub fn reset_desired_col(&mut self, table: &PieceTable) {
        self.desired_col = self.line_col(table);
    }

    // -- Movement -----------------------------------------------------------

    /// Move by `delta` bytes, clamped to `[0, len]`. Crosses newlines freely.
    /// Resets the desired column.
    pub fn move_horizontal(&mut self, delta: isize, table: &PieceTable) {
        let len = table.len();
        self.offset = self.offset.min(len).saturating_add_signed(delta).min(len);
        self.reset_desired_col(table);
    }

    /// Move to the adjacent logical line, aiming for the desired column.
    ///
    /// Moving up from the first line or down from the last is a no-op. The
    /// desired column is left untouched so a run of vertical moves keeps it.
    /// Returns the new visual position under `width`.
    ///
    /// # Errors
    ///
    /// Never fails for a clamped cursor; the `Result` comes from the final
    /// offset-to-row/column mapping.
    pub fn move_vertical(
        &mut self,
        direction: Direction,
        table: &PieceTable,
        width: usize,
    ) -> Result<RowCol> {
        let len = table.len();
        let offset = self.offset.min(len);
        let start = start_of_line(table, offset);
        let end = end_of_line(table, offset);

        let target = match direction {
            Direction::Up if start > 0 => {
                let prev_end = start - 1;
                Some((start_of_line(table, prev_end), prev_end))
            }
            Direction::Down if end < len => {
                let next_start = end + 1;
                Some((next_start, end_of_line(table, next_start)))
            }
            Direction::Up | Direction::Down => None,
        };

        self.offset = match target {
            Some((line_start, line_end)) => {
                line_start + self.desired_col.min(line_end - line_start)
            }
            None => offset,
        };
        offset_to_rowcol(table, self.offset, width)
    }

    // -- Edit tracking ------------------------------------------------------

    /// Account for `len` bytes inserted at `pos`. An insert at or before the
    /// cursor pushes it right; one after it changes nothing.
    pub const fn adjust_for_insert(&mut self, pos: usize, len: usize) {
        if pos <= self.offset {
            self.offset += len;
        }
    }

    /// Account for `len` bytes removed at `pos`. A range wholly before the
    /// cursor pulls it left; a range containing it collapses it to `pos`.
    pub const fn adjust_for_delete(&mut self, pos: usize, len: usize) {
        if pos >= self.offset {
            return;
        }
        if pos + len <= self.offset {
            self.offset -= len;
        } else {
            self.offset = pos;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
