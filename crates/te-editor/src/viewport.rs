//! Viewport — the bridge from piece table to grid.
//!
//! A [`Projector`] walks the document from its first byte and lays it into a
//! [`Grid`] sized to a [`Bounds`] window. It handles:
//!
//! - **Soft wrap** — a row ends at a newline or once the window is full
//! - **Scrolling** — window rows above/below the screen each skip one
//!   logical line; window columns left/right of the screen still consume
//!   their byte but write nothing
//! - **Line numbers** — an optional right-aligned gutter on the row where
//!   each logical line begins
//! - **Cursor placement** — the grid cell a cursor offset landed on
//!
//! The grid always starts blank, so nothing from an earlier frame survives.
//! It is returned in window-local coordinates; the renderer places it on the
//! screen at the window origin (see [`Grid::blit`]).
//!
//! ```text
//! PieceTable          Projector            Grid (window-local)
//! ┌──────────┐   ┌──────────────┐    ┌───────────────┐
//! │ ab\ncde  │──▶│ wrap, clip,  │──▶ │ 1 ab          │
//! └──────────┘   │ gutter       │    │ 2 cde         │
//!                └──────────────┘    └───────────────┘
//! ```

use std::iter::Peekable;

use crate::grid::{Bounds, Grid, Size, offset_i32};
use crate::piece_table::{Bytes, PieceTable};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute gutter width for line numbers: the digits of the largest line
/// number plus one separator column.
///
/// | Lines   | Digits | Gutter |
/// |---------|--------|--------|
/// | 1–9     | 1      | 2      |
/// | 10–99   | 2      | 3      |
/// | 100–999 | 3      | 4      |
#[must_use]
pub fn gutter_width(line_count: usize) -> usize {
    // ilog10 panics on 0.
    let n = line_count.max(1);
    n.ilog10() as usize + 2
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Display configuration for a projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    /// Draw the line-number gutter.
    pub line_numbers: bool,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// A projected window: the grid plus where the cursor landed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub grid: Grid,
    /// Window-local `(row, col)` of the cursor, if it is visible.
    pub cursor: Option<(usize, usize)>,
}

/// How a window row stopped consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowEnd {
    Newline,
    Wrapped,
    Exhausted,
}

/// Projects documents onto a screen of a fixed size.
///
/// The screen size decides which window cells are clipped; the window itself
/// is passed per call so one projector can serve several panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    screen: Size,
    options: ViewOptions,
}

impl Projector {
    /// A projector for a screen of `screen` cells, default options.
    #[must_use]
    pub const fn new(screen: Size) -> Self {
        Self {
            screen,
            options: ViewOptions { line_numbers: false },
        }
    }

    #[must_use]
    pub const fn with_options(self, options: ViewOptions) -> Self {
        Self { options, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn screen(&self) -> Size {
        self.screen
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> ViewOptions {
        self.options
    }

    /// Columns the gutter takes for `table` inside a window `width` wide.
    #[must_use]
    pub fn gutter_for(&self, table: &PieceTable, width: usize) -> usize {
        if self.options.line_numbers {
            gutter_width(table.line_count()).min(width)
        } else {
            0
        }
    }

    /// Project `table` into a `bounds.height × bounds.width` grid.
    #[must_use]
    pub fn project(&self, table: &PieceTable, bounds: Bounds) -> Grid {
        self.render(table, bounds, None).grid
    }

    /// Project `table` and locate the cell holding `cursor`.
    #[must_use]
    pub fn project_with_cursor(
        &self,
        table: &PieceTable,
        bounds: Bounds,
        cursor: usize,
    ) -> Projection {
        self.render(table, bounds, Some(cursor))
    }

    fn render(&self, table: &PieceTable, bounds: Bounds, cursor: Option<usize>) -> Projection {
        let mut grid = Grid::new(bounds.width, bounds.height);
        let gutter = self.gutter_for(table, bounds.width);
        let text = bounds.shrink_left(gutter);
        let line_count = table.line_count();

        let mut bytes = table.bytes().peekable();
        let mut offset = 0;
        let mut line = 0;
        let mut line_start = true;
        let mut cursor_cell = None;

        for r in 0..bounds.height {
            let exhausted = bytes.peek().is_none();
            let owes_label = line_start && line < line_count;
            if exhausted && !owes_label && cursor != Some(offset) {
                break;
            }

            let screen_row = offset_i32(bounds.origin_row, r);
            if screen_row < 0 || screen_row >= offset_i32(0, self.screen.rows) {
                offset += skip_line(&mut bytes);
                line += 1;
                line_start = true;
                continue;
            }

            if gutter > 0 && line_start {
                let at = (screen_row, bounds.origin_col);
                self.draw_label(&mut grid, r, at, gutter, line + 1);
            }

            let mut end = RowEnd::Wrapped;
            for c in 0..text.width {
                let screen_col = offset_i32(text.origin_col, c);
                let visible = self.screen.contains(screen_row, screen_col);
                if visible && cursor == Some(offset) {
                    cursor_cell = Some((r, gutter + c));
                }
                let Some(byte) = bytes.next() else {
                    end = RowEnd::Exhausted;
                    break;
                };
                offset += 1;
                if byte == b'\n' {
                    end = RowEnd::Newline;
                    break;
                }
                if visible {
                    grid.set(r, gutter + c, byte);
                }
            }

            match end {
                RowEnd::Newline => {
                    line += 1;
                    line_start = true;
                }
                RowEnd::Wrapped => line_start = false,
                RowEnd::Exhausted => break,
            }
        }

        tracing::trace!(
            rows = bounds.height,
            cols = bounds.width,
            consumed = offset,
            "projected viewport"
        );
        Projection {
            grid,
            cursor: cursor_cell,
        }
    }

    /// Right-align `number` in the gutter, leaving the last column blank.
    /// `at` is the screen cell of the row's first column.
    fn draw_label(&self, grid: &mut Grid, row: usize, at: (i32, i32), gutter: usize, number: usize) {
        let digits = gutter.saturating_sub(1);
        let label = format!("{number:>digits$}");
        let (screen_row, origin_col) = at;
        for (c, byte) in label.bytes().take(digits).enumerate() {
            if self.screen.contains(screen_row, offset_i32(origin_col, c)) {
                grid.set(row, c, byte);
            }
        }
    }
}

/// Project `table` into `bounds` on the smallest screen that holds them.
#[must_use]
pub fn project(table: &PieceTable, bounds: Bounds) -> Grid {
    Projector::new(bounds.extent()).project(table, bounds)
}

/// Consume through the next newline (or to the end). Returns bytes consumed.
fn skip_line(bytes: &mut Peekable<Bytes<'_>>) -> usize {
    let mut consumed = 0;
    for byte in bytes.by_ref() {
        consumed += 1;
        if byte == b'\n' {
            break;
        }
    }
    consumed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
