//! # te-editor — Editor core for te
//!
//! This crate contains the text engine behind the editor:
//!
//! - **[`piece_table`]** — `PieceTable`: immutable original bytes, an
//!   append-only added arena, and the piece sequence that stitches them
//! - **[`cursor`]** — byte offset ↔ visual row/column under soft wrap, and a
//!   `Cursor` with a remembered column
//! - **[`position`]** — `RowCol` screen coordinates and `Direction`
//! - **[`grid`]** — `Bounds`, `Size`, and the byte `Grid` the renderer blits
//! - **[`viewport`]** — `Projector`: wraps and clips the document into a grid,
//!   with an optional line-number gutter
//! - **[`document`]** — `Document`: a table and its cursor, kept consistent
//!   across edits
//! - **[`error`]** — `EditError` and the crate `Result`
//!
//! Everything is byte-oriented and single-threaded. Terminal I/O lives in the
//! binary; nothing here touches the screen.

pub mod cursor;
pub mod document;
pub mod error;
pub mod grid;
pub mod piece_table;
pub mod position;
pub mod viewport;

pub use document::Document;
pub use error::{EditError, Result};
pub use piece_table::PieceTable;
