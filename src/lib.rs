//! # termtable
//!
//! Taskwarrior-style terminal tables: borderless columns with automatic
//! width allocation, soft text wrapping, ANSI color attributes and inline
//! Markdown rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use termtable::prelude::*;
//!
//! let mut table = Table::with_style(TableStyle {
//!     default_width: 60,
//!     fit_to_terminal: false,
//!     ..TableStyle::default()
//! });
//! table.add_header(["Task", "Status"]);
//! table.add_row(row!["write docs", "done"]);
//! table.add_row(row!["ship release", "pending"]);
//! print!("{}", table.render());
//! ```
//!
//! ## Core Concepts
//!
//! - **Table**: accumulates a header, rows and style overrides, then renders
//!   everything to a single string
//! - **Cell**: one entry's content plus prefix/suffix decorations
//! - **CellStyle**: alignment, wrapping, Markdown and ANSI attributes,
//!   composable across header/row/column/cell scopes
//! - **Widths**: per-column minimum/maximum footprints reconciled against the
//!   terminal width by the expand/shrink allocator

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod cells;
pub mod markdown;
pub mod row;
pub mod style;
pub mod table;
pub mod terminal;
pub mod width;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::cell::{Cell, Decoration};
    pub use crate::row;
    pub use crate::row::{Row, RowValue};
    pub use crate::style::{Alignment, Attr, Attrs, CellStyle, TableStyle};
    pub use crate::table::Table;
}

// Re-export key types at crate root
pub use cell::{Cell, Decoration};
pub use row::{Row, RowValue};
pub use style::{Alignment, Attr, Attrs, CellStyle, TableStyle};
pub use table::Table;
