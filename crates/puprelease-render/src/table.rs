//! Two-column key/value table printed one row at a time.
//!
//! The key column has a fixed width. When the table has a total width, the
//! value column is rewrapped to the remaining space and continuation lines
//! are indented so they stay under the value column.
//!
//! ```rust
//! use puprelease_render::KeyValueTable;
//!
//! let table = KeyValueTable::new(10).total_width(20);
//! let row = table.format_row("Tags", "red green blue yellow").unwrap();
//! assert_eq!(
//!     row.text,
//!     "Tags:     red green\n          blue\n          yellow"
//! );
//! assert!(row.diagnostic.is_none());
//! ```
//!
//! Rows are independent: the table keeps no state between them, so it can
//! be printed while the values are still being computed.

use std::io::Write;

use crate::console::Console;
use crate::diagnostic::Diagnostic;
use crate::error::RenderError;
use crate::text::{display_width, pad_right, rewrap};

/// Separator placed between a key and its value.
pub const DEFAULT_SEPARATOR: &str = ": ";

/// A rendered row plus any diagnostic raised while laying it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    /// The row text, possibly spanning several lines, without a trailing
    /// newline.
    pub text: String,
    pub diagnostic: Option<Diagnostic>,
}

/// A two-column table whose rows are written as soon as they are known.
///
/// `key_column_width` should be at least as large as the longest key plus
/// the separator. Narrower columns still print, misaligned, and report a
/// warning [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueTable {
    key_column_width: usize,
    total_width: Option<usize>,
    separator: String,
}

impl KeyValueTable {
    /// Creates a table whose values are printed unwrapped.
    pub fn new(key_column_width: usize) -> Self {
        Self {
            key_column_width,
            total_width: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Wraps values so each row fits in `total_width` columns.
    pub fn total_width(mut self, total_width: usize) -> Self {
        self.total_width = Some(total_width);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn key_column_width(&self) -> usize {
        self.key_column_width
    }

    pub fn get_total_width(&self) -> Option<usize> {
        self.total_width
    }

    pub fn get_separator(&self) -> &str {
        &self.separator
    }

    /// Width available to values, or `None` when values are not wrapped.
    ///
    /// A zero-width value column is widened to one column, which puts each
    /// word of the value on its own line.
    pub fn value_column_width(&self) -> Result<Option<usize>, RenderError> {
        match self.total_width {
            None => Ok(None),
            Some(total) if total < self.key_column_width => Err(RenderError::InvalidColumns {
                key_column_width: self.key_column_width,
                total_width: total,
            }),
            Some(total) => Ok(Some((total - self.key_column_width).max(1))),
        }
    }

    /// Lays out one row without writing it.
    pub fn format_row(&self, key: &str, value: &str) -> Result<FormattedRow, RenderError> {
        let value_width = self.value_column_width()?;

        let key_cell = format!("{}{}", key, self.separator);
        let key_cell_width = display_width(&key_cell);
        let diagnostic = (key_cell_width > self.key_column_width).then(|| {
            Diagnostic::warning(format!(
                "key_column_width should be at least {}",
                key_cell_width
            ))
        });

        let value_cell = match value_width {
            None => value.to_string(),
            Some(width) => {
                let indent = " ".repeat(self.key_column_width);
                rewrap(value, width).replace('\n', &format!("\n{}", indent))
            }
        };

        Ok(FormattedRow {
            text: pad_right(&key_cell, self.key_column_width) + &value_cell,
            diagnostic,
        })
    }

    /// Lays out one row and writes it raw to `console`.
    ///
    /// A narrow-column warning is logged through `tracing` and returned; it
    /// does not prevent the row from being written.
    pub fn print_row<W: Write>(
        &self,
        console: &mut Console<W>,
        key: &str,
        value: &str,
    ) -> Result<Option<Diagnostic>, RenderError> {
        let row = self.format_row(key, value)?;
        if let Some(diagnostic) = &row.diagnostic {
            tracing::warn!(
                key,
                required = display_width(key) + display_width(&self.separator),
                configured = self.key_column_width,
                "{}",
                diagnostic.message
            );
        }
        console.echo_raw(&row.text)?;
        Ok(row.diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Field values of one event, keyed by field name.
    #[derive(Default)]
    struct Fields(BTreeMap<String, String>);

    impl Visit for Fields {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    /// Records every event it sees, with its level.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(tracing::Level, BTreeMap<String, String>)>>>);

    impl<S: tracing::Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::default();
            event.record(&mut fields);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), fields.0));
        }
    }

    fn print_capturing(
        table: &KeyValueTable,
        key: &str,
        value: &str,
    ) -> Vec<(tracing::Level, BTreeMap<String, String>)> {
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        let mut console = Console::new(Vec::new());
        tracing::subscriber::with_default(subscriber, || {
            table.print_row(&mut console, key, value).unwrap();
        });
        let captured = events.0.lock().unwrap().clone();
        captured
    }

    fn printed(table: &KeyValueTable, rows: &[(&str, &str)]) -> String {
        let mut console = Console::new(Vec::new());
        for (key, value) in rows {
            table.print_row(&mut console, key, value).unwrap();
        }
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_row_without_total_width() {
        let table = KeyValueTable::new(10);
        let row = table.format_row("Name", "Alice").unwrap();
        assert_eq!(row.text, "Name:     Alice");
        assert!(row.diagnostic.is_none());
    }

    #[test]
    fn test_unwrapped_value_is_untouched() {
        let table = KeyValueTable::new(8);
        let row = table
            .format_row("Notes", "first  line\nsecond line")
            .unwrap();
        assert_eq!(row.text, "Notes:  first  line\nsecond line");
    }

    #[test]
    fn test_wrapped_value_is_indented() {
        let table = KeyValueTable::new(10).total_width(20);
        let row = table.format_row("Tags", "red green blue yellow").unwrap();
        assert_eq!(
            row.text,
            "Tags:     red green\n          blue\n          yellow"
        );
    }

    #[test]
    fn test_exact_key_width_no_warning() {
        let table = KeyValueTable::new(6);
        let row = table.format_row("Name", "Alice").unwrap();
        assert_eq!(row.text, "Name: Alice");
        assert!(row.diagnostic.is_none());
    }

    #[test]
    fn test_narrow_key_column_warns_but_prints() {
        let table = KeyValueTable::new(4);
        let row = table.format_row("Version", "1.2.0").unwrap();
        assert_eq!(row.text, "Version: 1.2.0");
        let diag = row.diagnostic.expect("warning expected");
        assert_eq!(diag, Diagnostic::warning("key_column_width should be at least 9"));
    }

    #[test]
    fn test_print_row_returns_warning() {
        let table = KeyValueTable::new(4);
        let mut console = Console::new(Vec::new());
        let diag = table.print_row(&mut console, "Version", "1.2.0").unwrap();
        assert!(diag.is_some());
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "Version: 1.2.0\n"
        );
    }

    #[test]
    fn test_print_row_logs_warning_event() {
        let events = print_capturing(&KeyValueTable::new(4), "Version", "1.2.0");
        assert_eq!(events.len(), 1);

        let (level, fields) = &events[0];
        assert_eq!(*level, tracing::Level::WARN);
        assert_eq!(fields["key"], "Version");
        assert_eq!(fields["required"], "9");
        assert_eq!(fields["configured"], "4");
        assert_eq!(fields["message"], "key_column_width should be at least 9");
    }

    #[test]
    fn test_print_row_logs_nothing_when_key_fits() {
        let events = print_capturing(&KeyValueTable::new(10), "Version", "1.2.0");
        assert!(events.is_empty());
    }

    #[test]
    fn test_print_row_is_raw_write() {
        // Console width must not rewrap an already aligned row.
        let table = KeyValueTable::new(10);
        let mut console = Console::new(Vec::new()).with_width(5);
        table.print_row(&mut console, "Name", "Alice").unwrap();
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "Name:     Alice\n"
        );
    }

    #[test]
    fn test_multiple_rows() {
        let table = KeyValueTable::new(10).total_width(30);
        let out = printed(
            &table,
            &[("Package", "puprelease"), ("Version", "0.3.0")],
        );
        assert_eq!(out, "Package:  puprelease\nVersion:  0.3.0\n");
    }

    #[test]
    fn test_custom_separator() {
        let table = KeyValueTable::new(8).separator(" = ");
        assert_eq!(table.get_separator(), " = ");
        let row = table.format_row("tag", "v1").unwrap();
        assert_eq!(row.text, "tag =   v1");
    }

    #[test]
    fn test_total_width_smaller_than_key_column_is_rejected() {
        let table = KeyValueTable::new(20).total_width(10);
        let err = table.format_row("Key", "value").unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidColumns {
                key_column_width: 20,
                total_width: 10
            }
        ));
    }

    #[test]
    fn test_rejected_row_writes_nothing() {
        let table = KeyValueTable::new(20).total_width(10);
        let mut console = Console::new(Vec::new());
        assert!(table.print_row(&mut console, "Key", "value").is_err());
        assert!(console.get_ref().is_empty());
    }

    #[test]
    fn test_zero_width_value_column_one_word_per_line() {
        let table = KeyValueTable::new(6).total_width(6);
        assert_eq!(table.value_column_width().unwrap(), Some(1));
        let row = table.format_row("Tags", "a b").unwrap();
        assert_eq!(row.text, "Tags: a\n      b");
    }

    #[test]
    fn test_empty_value() {
        let table = KeyValueTable::new(10).total_width(20);
        let row = table.format_row("Empty", "").unwrap();
        assert_eq!(row.text, "Empty:    ");
    }

    #[test]
    fn test_accessors() {
        let table = KeyValueTable::new(12).total_width(60);
        assert_eq!(table.key_column_width(), 12);
        assert_eq!(table.get_total_width(), Some(60));
        assert_eq!(table.get_separator(), DEFAULT_SEPARATOR);
        assert_eq!(table.value_column_width().unwrap(), Some(48));
    }
}
