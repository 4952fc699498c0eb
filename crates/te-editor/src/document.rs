//! Document — one open buffer.
//!
//! A `Document` owns a [`PieceTable`], the [`Cursor`] that indexes it, and a
//! modified flag. Every edit goes through here so the cursor is shifted or
//! collapsed in the same step; callers never patch it up by hand.
//!
//! Failed edits change nothing: not the text, not the cursor, not the flag.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::grid::Bounds;
use crate::piece_table::PieceTable;
use crate::position::{Direction, RowCol};
use crate::viewport::{Projection, Projector};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A piece table plus the cursor that moves through it.
#[derive(Debug, Default)]
pub struct Document {
    table: PieceTable,
    cursor: Cursor,
    modified: bool,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// An empty, unmodified document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding a copy of `bytes`, cursor at the start.
    #[must_use]
    pub fn load(bytes: &[u8]) -> Self {
        Self {
            table: PieceTable::load(bytes),
            cursor: Cursor::new(),
            modified: false,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn table(&self) -> &PieceTable {
        &self.table
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether any edit landed since load or the last [`mark_saved`](Self::mark_saved).
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// The current text, materialised.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.table.to_bytes()
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `pos`. A cursor at or after `pos` moves right.
    ///
    /// # Errors
    ///
    /// Whatever [`PieceTable::insert`] returns; nothing changes on error.
    pub fn insert(&mut self, pos: usize, text: &[u8]) -> Result<()> {
        if text.is_empty() {
            // Still validate the position.
            return self.table.insert(pos, text);
        }
        self.table.insert(pos, text)?;
        self.cursor.adjust_for_insert(pos, text.len());
        self.after_edit();
        Ok(())
    }

    /// Delete `len` bytes at `pos`. A cursor inside the range collapses to
    /// `pos`; one after it moves left by `len`.
    ///
    /// # Errors
    ///
    /// Whatever [`PieceTable::delete`] returns; nothing changes on error.
    pub fn delete(&mut self, pos: usize, len: usize) -> Result<()> {
        if len == 0 {
            return self.table.delete(pos, len);
        }
        self.table.delete(pos, len)?;
        self.cursor.adjust_for_delete(pos, len);
        self.after_edit();
        Ok(())
    }

    /// Type `text` at the cursor. The cursor ends just after it.
    ///
    /// # Errors
    ///
    /// [`EditError::AllocationFailure`](crate::error::EditError::AllocationFailure)
    /// if the table cannot grow.
    pub fn insert_at_cursor(&mut self, text: &[u8]) -> Result<()> {
        let pos = self.clamped_offset();
        self.insert(pos, text)
    }

    /// Delete up to `n` bytes before the cursor. Returns how many went.
    ///
    /// # Errors
    ///
    /// [`EditError::AllocationFailure`](crate::error::EditError::AllocationFailure)
    /// if the piece sequence cannot grow.
    pub fn backspace(&mut self, n: usize) -> Result<usize> {
        let end = self.clamped_offset();
        let count = n.min(end);
        self.delete(end - count, count)?;
        Ok(count)
    }

    /// Delete up to `n` bytes after the cursor. Returns how many went.
    ///
    /// # Errors
    ///
    /// [`EditError::AllocationFailure`](crate::error::EditError::AllocationFailure)
    /// if the piece sequence cannot grow.
    pub fn delete_forward(&mut self, n: usize) -> Result<usize> {
        let start = self.clamped_offset();
        let count = n.min(self.len() - start);
        self.delete(start, count)?;
        Ok(count)
    }

    fn after_edit(&mut self) {
        self.cursor.reset_desired_col(&self.table);
        self.modified = true;
    }

    fn clamped_offset(&self) -> usize {
        self.cursor.offset().min(self.len())
    }

    // -- Cursor -------------------------------------------------------------

    /// Place the cursor at `offset`.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfRange`](crate::error::EditError::OutOfRange) if
    /// `offset > len()`.
    pub fn set_cursor(&mut self, offset: usize) -> Result<()> {
        self.cursor.set_offset(offset, &self.table)
    }

    /// Move the cursor by `delta` bytes, clamped to the document.
    pub fn move_horizontal(&mut self, delta: isize) {
        self.cursor.move_horizontal(delta, &self.table);
    }

    /// Move the cursor one logical line up or down.
    ///
    /// # Errors
    ///
    /// See [`Cursor::move_vertical`].
    pub fn move_vertical(&mut self, direction: Direction, width: usize) -> Result<RowCol> {
        self.cursor.move_vertical(direction, &self.table, width)
    }

    /// Visual position of the cursor under `width`.
    ///
    /// # Errors
    ///
    /// See [`Cursor::rowcol`].
    pub fn cursor_rowcol(&self, width: usize) -> Result<RowCol> {
        self.cursor.rowcol(&self.table, width)
    }

    // -- Rendering ----------------------------------------------------------

    /// Project the document into `bounds` and locate the cursor cell.
    #[must_use]
    pub fn render(&self, projector: &Projector, bounds: Bounds) -> Projection {
        projector.project_with_cursor(&self.table, bounds, self.cursor.offset())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
