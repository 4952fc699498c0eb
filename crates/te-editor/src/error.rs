//! Edit errors.
//!
//! Every fallible operation in this crate returns [`Result`]. Errors are
//! synchronous and leave the document exactly as it was before the call, so
//! the caller can report them and carry on editing.

use thiserror::Error;

/// Errors produced by buffer edits, slicing, and offset mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The requested range `[start, end)` does not fit inside a document of
    /// `len` bytes, or `end < start`.
    #[error("range {start}..{end} out of bounds for document of {len} bytes")]
    OutOfRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// No document offset maps to this visual `(row, col)` under the
    /// requested wrap width.
    #[error("no offset at row {row}, column {col}")]
    NoSuchPosition { row: usize, col: usize },

    /// Growing a storage arena or the piece sequence failed.
    #[error("failed to reserve {requested} more elements")]
    AllocationFailure { requested: usize },
}

impl EditError {
    /// Shorthand for a single offset past the end of the document.
    #[inline]
    #[must_use]
    pub const fn offset(offset: usize, len: usize) -> Self {
        Self::OutOfRange {
            start: offset,
            end: offset,
            len,
        }
    }
}

/// Result alias used throughout the editor core.
pub type Result<T> = std::result::Result<T, EditError>;
