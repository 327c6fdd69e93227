//! Error type for console rendering.

use thiserror::Error;

/// Errors raised while laying out or writing console output.
///
/// Text layout itself cannot fail; these cover invalid table configuration
/// and failures of the underlying output stream.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The table's total width leaves no room for its key column.
    #[error("total_width ({total_width}) must be at least key_column_width ({key_column_width})")]
    InvalidColumns {
        key_column_width: usize,
        total_width: usize,
    },

    /// Writing to the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
