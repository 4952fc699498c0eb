//! Grid — the 2D byte canvas a viewport is projected into.
//!
//! Every cell is one byte; a blank cell holds a space. The projector fills a
//! grid in its own local coordinates, and a renderer composites it onto a
//! screen-sized grid with [`Grid::blit`].
//!
//! Design:
//!
//!   - Flat `Vec<u8>` with row-major indexing. A row's cells are contiguous,
//!     so a renderer can write each row with a single call.
//!
//!   - Placement rectangles ([`Bounds`]) use signed origins. A window scrolled
//!     partly above or left of the screen has a negative origin; the cells
//!     that land off-screen are skipped, never wrapped around.

use std::fmt;

/// The byte a blank cell holds.
pub const BLANK: u8 = b' ';

/// `base + n` in signed screen space, saturating at the `i32` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn offset_i32(base: i32, n: usize) -> i32 {
    let n = if n > i32::MAX as usize { i32::MAX } else { n as i32 };
    base.saturating_add(n)
}

// ─── Bounds ─────────────────────────────────────────────────────────────────────

/// A rectangular window on the screen.
///
/// `origin_row`/`origin_col` place the window's top-left cell in screen
/// coordinates and may be negative. `width`/`height` are the window's size in
/// cells.
///
/// # Examples
///
/// ```
/// use te_editor::grid::Bounds;
///
/// let b = Bounds::new(-2, 3, 10, 4);
/// assert_eq!(b.bottom(), 2);
/// assert_eq!(b.right(), 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// Top edge in screen rows (may be negative).
    pub origin_row: i32,
    /// Left edge in screen columns (may be negative).
    pub origin_col: i32,
    /// Width in columns.
    pub width: usize,
    /// Height in rows.
    pub height: usize,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub const fn new(origin_row: i32, origin_col: i32, width: usize, height: usize) -> Self {
        Self {
            origin_row,
            origin_col,
            width,
            height,
        }
    }

    /// Bounds at the screen origin covering `size`.
    #[inline]
    #[must_use]
    pub const fn of_size(size: Size) -> Self {
        Self::new(0, 0, size.cols, size.rows)
    }

    /// Bottom edge (exclusive) in screen rows.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        offset_i32(self.origin_row, self.height)
    }

    /// Right edge (exclusive) in screen columns.
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        offset_i32(self.origin_col, self.width)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The smallest screen, anchored at (0, 0), that contains these bounds.
    /// Edges left of or above the origin contribute nothing.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn extent(self) -> Size {
        let rows = if self.bottom() > 0 { self.bottom() as usize } else { 0 };
        let cols = if self.right() > 0 { self.right() as usize } else { 0 };
        Size::new(rows, cols)
    }

    /// Shrink from the left by `cols` columns, moving the origin right.
    #[must_use]
    pub const fn shrink_left(self, cols: usize) -> Self {
        let cols = if cols < self.width { cols } else { self.width };
        Self {
            origin_col: offset_i32(self.origin_col, cols),
            width: self.width - cols,
            ..self
        }
    }
}

// ─── Size ───────────────────────────────────────────────────────────────────────

/// Dimensions of a screen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Whether a signed screen cell falls on this surface.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn contains(self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
}

// ─── Grid ───────────────────────────────────────────────────────────────────────

/// A `height × width` grid of byte cells, blank on creation.
///
/// # Examples
///
/// ```
/// use te_editor::grid::Grid;
///
/// let mut grid = Grid::new(4, 2);
/// grid.set(1, 2, b'x');
/// assert_eq!(grid.row(1), Some(&b"  x "[..]));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a grid filled with blank cells.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Create a grid sized to a screen.
    #[must_use]
    pub fn for_screen(size: Size) -> Self {
        Self::new(size.cols, size.rows)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.height, self.width)
    }

    #[inline]
    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// The byte at `(row, col)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Write one cell. Returns `false` (and writes nothing) outside the grid.
    pub fn set(&mut self, row: usize, col: usize, byte: u8) -> bool {
        if row < self.height && col < self.width {
            let idx = self.index(row, col);
            self.cells[idx] = byte;
            true
        } else {
            false
        }
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row as a slice, or `None` past the bottom.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.height {
            let start = self.index(row, 0);
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }

    /// One mutable row, or `None` past the bottom.
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [u8]> {
        if row < self.height {
            let start = self.index(row, 0);
            let width = self.width;
            Some(&mut self.cells[start..start + width])
        } else {
            None
        }
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // A zero-width grid still has `height` (empty) rows.
        (0..self.height).map(move |row| {
            let start = row * self.width;
            &self.cells[start..start + self.width]
        })
    }

    /// Rows as lossily-decoded strings. Handy for tests and plain-text output.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect()
    }

    // ─── Clear & Composite ───────────────────────────────────────────────

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Copy `src` onto this grid with its top-left cell at `(at_row, at_col)`.
    ///
    /// Source cells that land outside this grid are skipped.
    #[allow(clippy::cast_sign_loss)]
    pub fn blit(&mut self, src: &Self, at_row: i32, at_col: i32) {
        let size = self.size();
        for (row, src_row) in src.rows().enumerate() {
            let dst_row = offset_i32(at_row, row);
            if dst_row < 0 {
                continue;
            }
            if dst_row as usize >= size.rows {
                break;
            }
            // Clip the run horizontally, then copy it in one go.
            let skip = if at_col < 0 { at_col.unsigned_abs() as usize } else { 0 };
            let dst_col = at_col.max(0) as usize;
            if skip >= src_row.len() || dst_col >= size.cols {
                continue;
            }
            let run = (src_row.len() - skip).min(size.cols - dst_col);
            if let Some(dst) = self.row_mut(dst_row as usize) {
                dst[dst_col..dst_col + run].copy_from_slice(&src_row[skip..skip + run]);
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rows", &self.to_lines())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.to_lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
