//! # puprelease-render - Console Text Layout
//!
//! Fixed-width, monospace text layout used by the `puprelease` release tool.
//!
//! ## Core Pieces
//!
//! - [`linearize`]: collapse whitespace runs into single spaces and trim
//! - [`rewrap`] / [`rewrap_with`]: linearize, then greedy word-wrap to a width
//! - [`KeyValueTable`]: two-column rows with a fixed key column and a
//!   wrapped, aligned value column
//! - [`Console`]: writes rewrapped (or raw) lines and section headers
//!
//! ## Quick Start
//!
//! ```rust
//! use puprelease_render::{Console, KeyValueTable};
//!
//! let mut console = Console::new(Vec::new());
//! console.print_header("Release").unwrap();
//!
//! let table = KeyValueTable::new(10);
//! table.print_row(&mut console, "Name", "Alice").unwrap();
//!
//! let out = String::from_utf8(console.into_inner()).unwrap();
//! assert_eq!(out, "\nRelease\n-------\nName:     Alice\n");
//! ```
//!
//! Layout problems that still produce output, such as a key wider than its
//! column, are reported as [`Diagnostic`] values rather than errors.

mod console;
mod diagnostic;
mod error;
mod table;
mod text;

pub use console::{Console, EchoOptions};
pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use error::RenderError;
pub use table::{FormattedRow, KeyValueTable, DEFAULT_SEPARATOR};
pub use text::{
    display_width, linearize, pad_right, rewrap, rewrap_with, WrapOptions, MAX_LINEWIDTH,
};
