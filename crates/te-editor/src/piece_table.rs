//! Piece table — the fundamental unit of text storage.
//!
//! A `PieceTable` holds the document as an ordered list of [`Piece`]s, each
//! pointing into one of two byte arenas:
//!
//! - **original** — the bytes handed to [`PieceTable::load`]. Never written
//!   again for the lifetime of the table.
//! - **added** — every byte ever inserted, appended in order. It only grows;
//!   bytes already written are never touched.
//!
//! Reading the pieces front to back and concatenating their bytes yields the
//! current document.
//!
//! # Design choices
//!
//! - **Pieces are index triples** `(source, start, len)`, never pointers or
//!   borrowed slices. The added arena is a `Vec<u8>` that reallocates as it
//!   grows, and an index into it stays valid across every reallocation.
//!
//! - **Byte offsets everywhere.** The table knows nothing about UTF-8 or
//!   display width; a newline is the single byte `0x0A`.
//!
//! - **Linear piece lookup.** Locating the piece for an offset walks the
//!   cumulative lengths. Edit-heavy sessions keep the sequence short because
//!   consecutive typing extends the last added piece instead of creating a
//!   new one.
//!
//! - **All-or-nothing edits.** Every edit reserves the memory it needs before
//!   touching any state, then swaps the affected pieces with one `splice`.
//!   A failed reservation leaves the table exactly as it was.

use std::fmt;
use std::iter::{Copied, Flatten, FusedIterator};

use crate::error::{EditError, Result};

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// Which arena a piece reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The content loaded when the table was created.
    Original,
    /// Bytes appended by inserts.
    Added,
}

/// A contiguous run of bytes inside one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub source: Source,
    pub start: usize,
    pub len: usize,
}

impl Piece {
    #[inline]
    #[must_use]
    pub const fn new(source: Source, start: usize, len: usize) -> Self {
        Self { source, start, len }
    }

    /// Arena offset one past the last byte of this piece.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Split `at` bytes into the piece. Either half may come back empty.
    const fn split(self, at: usize) -> (Self, Self) {
        (
            Self::new(self.source, self.start, at),
            Self::new(self.source, self.start + at, self.len - at),
        )
    }
}

// ---------------------------------------------------------------------------
// PieceTable
// ---------------------------------------------------------------------------

/// Edit-efficient byte storage for one document.
///
/// The running length is maintained on every edit, so [`len`](Self::len) is
/// O(1). Inserts and deletes cost O(pieces) for the lookup plus the size of
/// the inserted text; unedited content is never copied.
#[derive(Clone)]
pub struct PieceTable {
    original: Box<[u8]>,
    added: Vec<u8>,
    pieces: Vec<Piece>,
    len: usize,
}

impl PieceTable {
    // -- Construction -------------------------------------------------------

    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::load(&[])
    }

    /// Create a table whose original arena is a copy of `bytes`.
    #[must_use]
    pub fn load(bytes: &[u8]) -> Self {
        let pieces = if bytes.is_empty() {
            Vec::new()
        } else {
            vec![Piece::new(Source::Original, 0, bytes.len())]
        };
        tracing::debug!(bytes = bytes.len(), "loaded piece table");
        Self {
            original: bytes.into(),
            added: Vec::new(),
            pieces,
            len: bytes.len(),
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Document length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the document holds no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current piece sequence, in document order.
    #[inline]
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// The byte at `offset`, or `None` past the end.
    #[must_use]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len {
            return None;
        }
        let (index, piece_start) = self.locate(offset);
        let piece = self.pieces[index];
        Some(self.piece_bytes(piece)[offset - piece_start])
    }

    /// Number of occurrences of `byte` in the document.
    #[must_use]
    pub fn count_byte(&self, byte: u8) -> usize {
        self.pieces
            .iter()
            .map(|&piece| {
                self.piece_bytes(piece)
                    .iter()
                    .map(|&b| usize::from(b == byte))
                    .sum::<usize>()
            })
            .sum()
    }

    /// Offset of the first `byte` at or after `from`. A `from` past the end
    /// finds nothing.
    #[must_use]
    pub fn find_byte(&self, byte: u8, from: usize) -> Option<usize> {
        let from = from.min(self.len);
        let mut offset = from;
        for chunk in Chunks::new(self, from, self.len) {
            if let Some(i) = chunk.iter().position(|&b| b == byte) {
                return Some(offset + i);
            }
            offset += chunk.len();
        }
        None
    }

    /// Offset of the last `byte` strictly before `before`. A `before` past
    /// the end searches the whole document.
    #[must_use]
    pub fn rfind_byte(&self, byte: u8, before: usize) -> Option<usize> {
        let before = before.min(self.len);
        let mut end = before;
        for chunk in Chunks::new(self, 0, before).rev() {
            let start = end - chunk.len();
            if let Some(i) = chunk.iter().rposition(|&b| b == byte) {
                return Some(start + i);
            }
            end = start;
        }
        None
    }

    /// Number of logical lines. An empty document has one (empty) line, and a
    /// trailing newline opens one more.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.count_byte(b'\n') + 1
    }

    // -- Reading ------------------------------------------------------------

    /// The bytes in `[start, end)` as contiguous runs, one per piece touched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `start > end` or `end > len()`.
    pub fn chunks(&self, start: usize, end: usize) -> Result<Chunks<'_>> {
        self.check_range(start, end)?;
        Ok(Chunks::new(self, start, end))
    }

    /// A lazy, restartable iterator over the bytes in `[start, end)`.
    ///
    /// The iterator is double-ended, so backward scans (looking for the
    /// previous newline, say) never materialise the document.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `start > end` or `end > len()`.
    pub fn slice(&self, start: usize, end: usize) -> Result<Bytes<'_>> {
        self.check_range(start, end)?;
        Ok(Bytes::new(Chunks::new(self, start, end)))
    }

    /// Every byte of the document, in order.
    #[must_use]
    pub fn bytes(&self) -> Bytes<'_> {
        Bytes::new(Chunks::new(self, 0, self.len))
    }

    /// Materialise the whole document. Allocates; prefer [`slice`](Self::slice)
    /// or [`chunks`](Self::chunks) when a window is enough.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in Chunks::new(self, 0, self.len) {
            out.extend_from_slice(chunk);
        }
        out
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` so that it starts at document offset `pos`.
    ///
    /// Inserting at `0` or at `len()` never splits a piece. Inserting right
    /// after the most recently added bytes extends that piece in place.
    ///
    /// # Errors
    ///
    /// - [`EditError::OutOfRange`] if `pos > len()`.
    /// - [`EditError::AllocationFailure`] if the arena or piece list cannot
    ///   grow. The table is unchanged.
    pub fn insert(&mut self, pos: usize, text: &[u8]) -> Result<()> {
        if pos > self.len {
            return Err(EditError::offset(pos, self.len));
        }
        if text.is_empty() {
            return Ok(());
        }

        self.added
            .try_reserve(text.len())
            .map_err(|_| EditError::AllocationFailure {
                requested: text.len(),
            })?;
        self.pieces
            .try_reserve(2)
            .map_err(|_| EditError::AllocationFailure { requested: 2 })?;

        let (index, piece_start) = self.locate(pos);
        let added_start = self.added.len();
        self.added.extend_from_slice(text);
        let inserted = Piece::new(Source::Added, added_start, text.len());

        if pos == piece_start {
            // Boundary between pieces[index - 1] and pieces[index].
            match index.checked_sub(1).map(|prev| &mut self.pieces[prev]) {
                Some(prev) if prev.source == Source::Added && prev.end() == added_start => {
                    prev.len += text.len();
                }
                _ => self.pieces.insert(index, inserted),
            }
        } else {
            let (head, tail) = self.pieces[index].split(pos - piece_start);
            self.pieces.splice(index..=index, [head, inserted, tail]);
        }

        self.len += text.len();
        tracing::trace!(pos, bytes = text.len(), pieces = self.pieces.len(), "insert");
        Ok(())
    }

    /// Remove `len` bytes starting at `pos`.
    ///
    /// # Errors
    ///
    /// - [`EditError::OutOfRange`] if `pos + len > len()`.
    /// - [`EditError::AllocationFailure`] if a straddled piece cannot be
    ///   split. The table is unchanged.
    pub fn delete(&mut self, pos: usize, len: usize) -> Result<()> {
        let end = pos
            .checked_add(len)
            .filter(|&end| end <= self.len)
            .ok_or_else(|| EditError::OutOfRange {
                start: pos,
                end: pos.saturating_add(len),
                len: self.len,
            })?;
        if len == 0 {
            return Ok(());
        }

        self.pieces
            .try_reserve(1)
            .map_err(|_| EditError::AllocationFailure { requested: 1 })?;

        let (first, first_start) = self.locate(pos);
        let (last, last_start) = self.locate(end - 1);
        let (head, _) = self.pieces[first].split(pos - first_start);
        let (_, tail) = self.pieces[last].split(end - last_start);

        let kept = [head, tail].into_iter().filter(|piece| !piece.is_empty());
        self.pieces.splice(first..=last, kept);

        self.len -= len;
        tracing::trace!(pos, bytes = len, pieces = self.pieces.len(), "delete");
        Ok(())
    }

    // -- Internals ----------------------------------------------------------

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len {
            return Err(EditError::OutOfRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    fn piece_bytes(&self, piece: Piece) -> &[u8] {
        let arena: &[u8] = match piece.source {
            Source::Original => &self.original,
            Source::Added => &self.added,
        };
        &arena[piece.start..piece.end()]
    }

    /// Index of the piece covering `offset` and the document offset where
    /// that piece starts. `offset == len()` maps to one past the last piece.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut piece_start = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if offset < piece_start + piece.len {
                return (index, piece_start);
            }
            piece_start += piece.len;
        }
        (self.pieces.len(), piece_start)
    }
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceTable")
            .field("len", &self.len)
            .field("pieces", &self.pieces.len())
            .field("original", &self.original.len())
            .field("added", &self.added.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Contiguous byte runs of a document range, one per piece.
///
/// Produced by [`PieceTable::chunks`]. Cheap to clone; cloning restarts
/// nothing, it forks the iteration at the current point.
#[derive(Clone)]
pub struct Chunks<'a> {
    table: &'a PieceTable,
    /// Next piece to yield from the front.
    front: usize,
    /// One past the next piece to yield from the back.
    back: usize,
    /// Bytes to skip at the start of `pieces[front]`.
    head: usize,
    /// Bytes to keep at the start of `pieces[back - 1]`.
    tail: usize,
}

impl<'a> Chunks<'a> {
    fn new(table: &'a PieceTable, start: usize, end: usize) -> Self {
        if start == end {
            return Self {
                table,
                front: 0,
                back: 0,
                head: 0,
                tail: 0,
            };
        }
        let (front, front_start) = table.locate(start);
        let (last, last_start) = table.locate(end - 1);
        Self {
            table,
            front,
            back: last + 1,
            head: start - front_start,
            tail: end - last_start,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.front >= self.back {
            return None;
        }
        let table = self.table;
        let piece = table.pieces[self.front];
        let end = if self.front + 1 == self.back {
            self.tail
        } else {
            piece.len
        };
        let bytes = &table.piece_bytes(piece)[self.head..end];
        self.front += 1;
        self.head = 0;
        Some(bytes)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for Chunks<'a> {
    fn next_back(&mut self) -> Option<&'a [u8]> {
        if self.front >= self.back {
            return None;
        }
        let table = self.table;
        self.back -= 1;
        let piece = table.pieces[self.back];
        let start = if self.back == self.front { self.head } else { 0 };
        let bytes = &table.piece_bytes(piece)[start..self.tail];
        if let Some(prev) = self.back.checked_sub(1) {
            self.tail = table.pieces[prev].len;
        }
        Some(bytes)
    }
}

impl ExactSizeIterator for Chunks<'_> {}
impl FusedIterator for Chunks<'_> {}

/// Bytes of a document range, produced by [`PieceTable::slice`].
#[derive(Clone)]
pub struct Bytes<'a> {
    inner: Copied<Flatten<Chunks<'a>>>,
}

impl<'a> Bytes<'a> {
    fn new(chunks: Chunks<'a>) -> Self {
        Self {
            inner: chunks.flatten().copied(),
        }
    }
}

impl Iterator for Bytes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Bytes<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        self.inner.next_back()
    }
}

impl FusedIterator for Bytes<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn text(table: &PieceTable) -> String {
        String::from_utf8(table.to_bytes()).unwrap()
    }

    fn slice_vec(table: &PieceTable, start: usize, end: usize) -> Vec<u8> {
        table.slice(start, end).unwrap().collect()
    }

    /// Structural invariants that must hold after every call.
    fn assert_consistent(table: &PieceTable) {
        assert!(table.pieces().iter().all(|piece| !piece.is_empty()), "{table:?}");
        let sum: usize = table.pieces().iter().map(|piece| piece.len).sum();
        assert_eq!(sum, table.len());
        assert_eq!(table.is_empty(), table.pieces().is_empty());
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn load_round_trip() {
        for source in ["", "a", "Helloworld", "line one\nline two\n", "\n\n\n"] {
            let table = PieceTable::load(source.as_bytes());
            assert_eq!(table.to_bytes(), source.as_bytes());
            assert_eq!(table.len(), source.len());
            assert_consistent(&table);
        }
    }

    #[test]
    fn load_binary_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(PieceTable::load(&bytes).to_bytes(), bytes);
    }

    #[test]
    fn empty_table_has_no_pieces() {
        let table = PieceTable::new();
        assert!(table.is_empty());
        assert_eq!(table.piece_count(), 0);
        assert_eq!(table.line_count(), 1);
    }

    #[test]
    fn load_creates_single_original_piece() {
        let table = PieceTable::load(b"Helloworld");
        assert_eq!(table.pieces(), &[Piece::new(Source::Original, 0, 10)]);
    }

    // -- Insert -------------------------------------------------------------

    #[test]
    fn insert_then_delete_scenario() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        assert_eq!(text(&table), "HelloFOOworld");
        assert_eq!(table.len(), 13);

        table.delete(5, 3).unwrap();
        assert_eq!(text(&table), "Helloworld");
        assert_eq!(table.len(), 10);
        assert_consistent(&table);
    }

    #[test]
    fn insert_in_middle_splits_piece() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        assert_eq!(
            table.pieces(),
            &[
                Piece::new(Source::Original, 0, 5),
                Piece::new(Source::Added, 0, 3),
                Piece::new(Source::Original, 5, 5),
            ]
        );
    }

    #[test]
    fn prepend_does_not_split() {
        let mut table = PieceTable::load(b"world");
        table.insert(0, b"hello ").unwrap();
        assert_eq!(text(&table), "hello world");
        assert_eq!(
            table.pieces(),
            &[
                Piece::new(Source::Added, 0, 6),
                Piece::new(Source::Original, 0, 5),
            ]
        );
    }

    #[test]
    fn append_does_not_split() {
        let mut table = PieceTable::load(b"hello");
        table.insert(5, b" world").unwrap();
        assert_eq!(text(&table), "hello world");
        assert_eq!(
            table.pieces(),
            &[
                Piece::new(Source::Original, 0, 5),
                Piece::new(Source::Added, 0, 6),
            ]
        );
    }

    #[test]
    fn insert_into_empty() {
        let mut table = PieceTable::new();
        table.insert(0, b"abc").unwrap();
        assert_eq!(text(&table), "abc");
        assert_eq!(table.piece_count(), 1);
    }

    #[test]
    fn insert_at_piece_boundary() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        // Offset 8 is the boundary between the added piece and "world".
        table.insert(0, b">").unwrap();
        table.insert(9, b"|").unwrap();
        assert_eq!(text(&table), ">HelloFOO|world");
        assert_consistent(&table);
    }

    #[test]
    fn consecutive_typing_extends_piece() {
        let mut table = PieceTable::load(b"ac");
        for (i, ch) in b"bbbb".iter().enumerate() {
            table.insert(1 + i, &[*ch]).unwrap();
        }
        assert_eq!(text(&table), "abbbbc");
        assert_eq!(table.piece_count(), 3);
    }

    #[test]
    fn typing_elsewhere_does_not_extend() {
        let mut table = PieceTable::load(b"ac");
        table.insert(1, b"b").unwrap();
        table.insert(0, b"x").unwrap();
        // "x" is newer than "b" but not adjacent to it in the document.
        table.insert(3, b"y").unwrap();
        assert_eq!(text(&table), "xabyc");
        assert_consistent(&table);
    }

    #[test]
    fn insert_empty_is_noop() {
        let mut table = PieceTable::load(b"abc");
        table.insert(1, b"").unwrap();
        assert_eq!(table.piece_count(), 1);
        assert_eq!(text(&table), "abc");
    }

    #[test]
    fn insert_past_end_fails() {
        let mut table = PieceTable::load(b"abc");
        assert_eq!(
            table.insert(4, b"x"),
            Err(EditError::OutOfRange {
                start: 4,
                end: 4,
                len: 3
            })
        );
        assert_eq!(text(&table), "abc");
        assert_eq!(table.piece_count(), 1);
    }

    #[test]
    fn insert_preserves_surroundings() {
        let original = b"The quick brown fox".to_vec();
        for pos in 0..=original.len() {
            let mut table = PieceTable::load(&original);
            table.insert(pos, b"XYZ").unwrap();
            assert_eq!(table.len(), original.len() + 3);
            assert_eq!(slice_vec(&table, 0, pos), &original[..pos]);
            assert_eq!(slice_vec(&table, pos, pos + 3), b"XYZ");
            assert_eq!(slice_vec(&table, pos + 3, table.len()), &original[pos..]);
        }
    }

    // -- Delete -------------------------------------------------------------

    #[test]
    fn delete_prefix_and_suffix() {
        let mut table = PieceTable::load(b"Helloworld");
        table.delete(0, 2).unwrap();
        table.delete(6, 2).unwrap();
        assert_eq!(text(&table), "llowor");
        assert_eq!(table.pieces(), &[Piece::new(Source::Original, 2, 6)]);
    }

    #[test]
    fn delete_inside_piece_keeps_both_sides() {
        let mut table = PieceTable::load(b"Helloworld");
        table.delete(3, 4).unwrap();
        assert_eq!(text(&table), "Helrld");
        assert_eq!(
            table.pieces(),
            &[
                Piece::new(Source::Original, 0, 3),
                Piece::new(Source::Original, 7, 3),
            ]
        );
    }

    #[test]
    fn delete_across_pieces() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        // "HelloFOOworld" -> drop "loFOOwo"
        table.delete(3, 7).unwrap();
        assert_eq!(text(&table), "Helrld");
        assert_consistent(&table);
    }

    #[test]
    fn delete_exact_piece() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        table.delete(5, 3).unwrap();
        assert_eq!(table.piece_count(), 2);
        assert_consistent(&table);
    }

    #[test]
    fn delete_everything() {
        let mut table = PieceTable::load(b"abc");
        table.insert(3, b"def").unwrap();
        table.delete(0, 6).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.piece_count(), 0);
        assert_eq!(table.to_bytes(), b"");
    }

    #[test]
    fn delete_zero_is_noop() {
        let mut table = PieceTable::load(b"abc");
        table.delete(3, 0).unwrap();
        assert_eq!(text(&table), "abc");
    }

    #[test]
    fn delete_out_of_range_fails() {
        let mut table = PieceTable::load(b"abc");
        assert_eq!(
            table.delete(2, 2),
            Err(EditError::OutOfRange {
                start: 2,
                end: 4,
                len: 3
            })
        );
        // The reported end saturates instead of overflowing.
        assert_eq!(
            table.delete(usize::MAX, 2),
            Err(EditError::OutOfRange {
                start: usize::MAX,
                end: usize::MAX,
                len: 3
            })
        );
        assert_eq!(text(&table), "abc");
    }

    #[test]
    fn delete_preserves_surroundings() {
        let original = b"The quick brown fox".to_vec();
        for pos in 0..original.len() {
            for len in 0..=(original.len() - pos) {
                let mut table = PieceTable::load(&original);
                table.insert(4, b"very ").unwrap();
                table.delete(4, 5).unwrap();
                table.delete(pos, len).unwrap();
                assert_eq!(table.len(), original.len() - len);
                assert_eq!(slice_vec(&table, 0, pos), &original[..pos]);
                assert_eq!(slice_vec(&table, pos, table.len()), &original[pos + len..]);
            }
        }
    }

    // -- Reading ------------------------------------------------------------

    #[test]
    fn slice_reads_across_pieces() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        assert_eq!(slice_vec(&table, 3, 10), b"loFOOwo");
        assert_eq!(slice_vec(&table, 6, 6), b"");
        assert_eq!(slice_vec(&table, 13, 13), b"");
    }

    #[test]
    fn slice_reverse() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        let rev: Vec<u8> = table.slice(3, 10).unwrap().rev().collect();
        assert_eq!(rev, b"owOOFol");
    }

    #[test]
    fn slice_from_both_ends() {
        let mut table = PieceTable::load(b"abcdef");
        table.insert(3, b"XY").unwrap();
        let mut it = table.slice(1, 7).unwrap();
        // "abcXYdef"[1..7] is "bcXYde".
        assert_eq!(it.next(), Some(b'b'));
        assert_eq!(it.next_back(), Some(b'e'));
        assert_eq!(it.next_back(), Some(b'd'));
        assert_eq!(it.next(), Some(b'c'));
        assert_eq!(it.next(), Some(b'X'));
        assert_eq!(it.next(), Some(b'Y'));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn slice_is_restartable() {
        let table = PieceTable::load(b"abc\ndef");
        let it = table.slice(2, 6).unwrap();
        let first: Vec<u8> = it.clone().collect();
        let second: Vec<u8> = it.collect();
        assert_eq!(first, second);
        assert_eq!(first, b"c\nde");
    }

    #[test]
    fn slice_out_of_range() {
        let table = PieceTable::load(b"abc");
        assert!(table.slice(0, 4).is_err());
        assert!(table.slice(2, 1).is_err());
        assert!(table.chunks(4, 4).is_err());
    }

    #[test]
    fn chunks_follow_pieces() {
        let mut table = PieceTable::load(b"Helloworld");
        table.insert(5, b"FOO").unwrap();
        let chunks: Vec<&[u8]> = table.chunks(2, 11).unwrap().collect();
        assert_eq!(chunks, vec![&b"llo"[..], b"FOO", b"wor"]);
        let back: Vec<&[u8]> = table.chunks(2, 11).unwrap().rev().collect();
        assert_eq!(back, vec![&b"wor"[..], b"FOO", b"llo"]);
    }

    #[test]
    fn chunks_within_one_piece() {
        let table = PieceTable::load(b"Helloworld");
        let chunks: Vec<&[u8]> = table.chunks(2, 4).unwrap().collect();
        assert_eq!(chunks, vec![&b"ll"[..]]);
        let back: Vec<&[u8]> = table.chunks(2, 4).unwrap().rev().collect();
        assert_eq!(back, vec![&b"ll"[..]]);
    }

    #[test]
    fn byte_at_and_counts() {
        let mut table = PieceTable::load(b"ab\ncd");
        table.insert(5, b"\nef").unwrap();
        assert_eq!(table.byte_at(0), Some(b'a'));
        assert_eq!(table.byte_at(5), Some(b'\n'));
        assert_eq!(table.byte_at(7), Some(b'f'));
        assert_eq!(table.byte_at(8), None);
        assert_eq!(table.count_byte(b'\n'), 2);
        assert_eq!(table.line_count(), 3);
        // Counted across a split original piece.
        table.insert(1, b"\n\n").unwrap();
        assert_eq!(table.count_byte(b'\n'), 4);
        assert_eq!(table.count_byte(b'z'), 0);
    }

    #[test]
    fn find_and_rfind_across_pieces() {
        let mut table = PieceTable::load(b"ab\ncd");
        table.insert(5, b"\nef").unwrap();
        // "ab\ncd\nef"
        assert_eq!(table.find_byte(b'\n', 0), Some(2));
        assert_eq!(table.find_byte(b'\n', 3), Some(5));
        assert_eq!(table.find_byte(b'\n', 6), None);
        assert_eq!(table.find_byte(b'\n', 100), None);
        assert_eq!(table.rfind_byte(b'\n', 8), Some(5));
        assert_eq!(table.rfind_byte(b'\n', 5), Some(2));
        assert_eq!(table.rfind_byte(b'\n', 2), None);
        assert_eq!(table.rfind_byte(b'\n', 100), Some(5));
    }

    // -- Arena growth -------------------------------------------------------

    #[test]
    fn arena_growth_keeps_earlier_text() {
        let mut table = PieceTable::load(b"[]");
        table.insert(1, b"first").unwrap();
        let capacity = table.added.capacity();

        // Insert at the front each time so nothing coalesces with "first".
        let mut inserted = 0;
        while table.added.capacity() == capacity {
            table.insert(0, b"0123456789").unwrap();
            inserted += 10;
        }

        let bytes = table.to_bytes();
        assert_eq!(&bytes[inserted..], b"[first]");
        assert!(bytes[..inserted].chunks(10).all(|chunk| chunk == b"0123456789"));
        assert_consistent(&table);
    }

    // -- Oracle -------------------------------------------------------------

    #[test]
    fn matches_vec_model_under_random_edits() {
        let mut rng = StdRng::seed_from_u64(0x7e_5eed);
        for _ in 0..20 {
            let seed_len = rng.gen_range(0..40);
            let seed: Vec<u8> = (0..seed_len).map(|_| rng.gen_range(b'a'..=b'z')).collect();
            let mut model = seed.clone();
            let mut table = PieceTable::load(&seed);

            for _ in 0..300 {
                if model.is_empty() || rng.gen_bool(0.6) {
                    let pos = rng.gen_range(0..=model.len());
                    let count = rng.gen_range(0..8);
                    let text: Vec<u8> = (0..count).map(|_| rng.gen_range(b'A'..=b'Z')).collect();
                    table.insert(pos, &text).unwrap();
                    model.splice(pos..pos, text);
                } else {
                    let pos = rng.gen_range(0..model.len());
                    let len = rng.gen_range(0..=(model.len() - pos).min(12));
                    table.delete(pos, len).unwrap();
                    model.drain(pos..pos + len);
                }
                assert_eq!(table.len(), model.len());
                assert_consistent(&table);
            }
            assert_eq!(table.to_bytes(), model);
        }
    }
}
