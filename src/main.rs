// SPDX-License-Identifier: MIT
//
// te — a piece-table text engine with a one-shot terminal preview.
//
// The binary loads a file into a Document, projects it onto a screen-sized
// grid and prints the grid. It is the renderer side of the engine in its
// simplest form:
//
//   file → Document::load → Projector::project_with_cursor → Grid::blit → stdout
//
// Scrolling moves the window origin above/left of the screen, so the
// projector clips those rows and columns exactly as a live view would.
//
//   ┌──────────────────────────────┐
//   │ gutter │ text area           │  ← --rows × --cols
//   └──────────────────────────────┘

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use te_editor::Document;
use te_editor::grid::{Bounds, Grid, Size};
use te_editor::viewport::{Projector, ViewOptions};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "te", about = "Preview a file through the te text engine", version)]
struct Args {
    /// File to load. Omit for an empty document.
    file: Option<PathBuf>,

    /// Screen rows.
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Screen columns.
    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// Lines scrolled off the top of the screen.
    #[arg(long, default_value_t = 0)]
    scroll_row: usize,

    /// Columns scrolled off the left of the screen.
    #[arg(long, default_value_t = 0)]
    scroll_col: usize,

    /// Show line numbers.
    #[arg(long)]
    number: bool,

    /// Cursor byte offset.
    #[arg(long, default_value_t = 0)]
    cursor: usize,
}

// ─── Preview ────────────────────────────────────────────────────────────────

/// Window bounds for a screen scrolled by `(scroll_row, scroll_col)`.
///
/// The window is grown by the scroll amount so its visible part still covers
/// the whole screen.
fn scrolled_bounds(screen: Size, scroll_row: usize, scroll_col: usize) -> Result<Bounds> {
    let origin_row = i32::try_from(scroll_row).context("--scroll-row is too large")?;
    let origin_col = i32::try_from(scroll_col).context("--scroll-col is too large")?;
    Ok(Bounds::new(
        -origin_row,
        -origin_col,
        screen.cols + scroll_col,
        screen.rows + scroll_row,
    ))
}

fn projector(args: &Args) -> Projector {
    Projector::new(Size::new(args.rows, args.cols)).with_options(ViewOptions {
        line_numbers: args.number,
    })
}

/// Columns a row holds before it wraps: the scrolled window minus the gutter.
fn wrap_width(doc: &Document, args: &Args) -> Result<usize> {
    let projector = projector(args);
    let bounds = scrolled_bounds(projector.screen(), args.scroll_row, args.scroll_col)?;
    Ok(bounds.width - projector.gutter_for(doc.table(), bounds.width))
}

/// Render `doc` onto a fresh screen. Returns the screen and the cursor cell.
fn preview(doc: &Document, args: &Args) -> Result<(Grid, Option<(usize, usize)>)> {
    let projector = projector(args);
    let screen = projector.screen();
    let bounds = scrolled_bounds(screen, args.scroll_row, args.scroll_col)?;

    let projection = doc.render(&projector, bounds);
    let mut frame = Grid::for_screen(screen);
    frame.blit(&projection.grid, bounds.origin_row, bounds.origin_col);

    // Window-local cell → screen cell.
    let cursor = projection.cursor.and_then(|(row, col)| {
        Some((
            row.checked_sub(args.scroll_row)?,
            col.checked_sub(args.scroll_col)?,
        ))
    });
    Ok((frame, cursor))
}

fn write_frame(out: &mut impl Write, frame: &Grid) -> io::Result<()> {
    for row in frame.rows() {
        let end = row.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        out.write_all(&row[..end])?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn run(args: &Args) -> Result<()> {
    let mut doc = match &args.file {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded");
            Document::load(&bytes)
        }
        None => Document::new(),
    };

    doc.set_cursor(args.cursor)
        .with_context(|| format!("--cursor {} is past the end of the document", args.cursor))?;
    let pos = doc.cursor_rowcol(wrap_width(&doc, args)?)?;
    tracing::info!(offset = args.cursor, position = %pos, "cursor");

    let (frame, cell) = preview(&doc, args)?;
    match cell {
        Some((row, col)) => tracing::debug!(row, col, "cursor cell"),
        None => tracing::debug!("cursor off screen"),
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_frame(&mut out, &frame).context("failed to write preview")?;
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "te=info,te_editor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    run(&args)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
