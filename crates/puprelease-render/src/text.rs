//! Whitespace normalization and greedy word wrapping.
//!
//! Text shown by `puprelease` usually starts life as an indented, multi-line
//! string literal. [`linearize`] flattens such a string into a single line,
//! and [`rewrap`] flows it back into lines that fit the console.
//!
//! ```rust
//! use puprelease_render::{linearize, rewrap};
//!
//! assert_eq!(linearize("  a   b\nc  "), "a b c");
//! assert_eq!(rewrap("the quick brown fox", 10), "the quick\nbrown fox");
//! ```

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::UnicodeWidthChar;

/// Default maximum line width for console output.
pub const MAX_LINEWIDTH: usize = 75;

/// Collapses every run of whitespace into a single space and trims both ends.
///
/// Newlines, tabs and any other Unicode whitespace count as whitespace.
///
/// # Example
///
/// ```rust
/// use puprelease_render::linearize;
///
/// assert_eq!(linearize("first line\n    second line\t"), "first line second line");
/// assert_eq!(linearize(""), "");
/// ```
pub fn linearize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

/// Options for [`rewrap_with`].
///
/// Only the width and the line indents can be changed. Words are always
/// kept whole and packed greedily, whatever the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions<'a> {
    /// Maximum line width in display columns, indents included.
    pub width: usize,
    /// Prefix for the first output line.
    pub initial_indent: &'a str,
    /// Prefix for every line after the first.
    pub subsequent_indent: &'a str,
}

impl Default for WrapOptions<'_> {
    fn default() -> Self {
        Self::new(MAX_LINEWIDTH)
    }
}

impl<'a> WrapOptions<'a> {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            initial_indent: "",
            subsequent_indent: "",
        }
    }

    pub fn initial_indent(mut self, indent: &'a str) -> Self {
        self.initial_indent = indent;
        self
    }

    pub fn subsequent_indent(mut self, indent: &'a str) -> Self {
        self.subsequent_indent = indent;
        self
    }

    /// Room left for words on the first line and on every later line.
    fn line_widths(&self) -> [f64; 2] {
        [
            self.width.saturating_sub(display_width(self.initial_indent)) as f64,
            self.width.saturating_sub(display_width(self.subsequent_indent)) as f64,
        ]
    }
}

/// A word of linearized text, measured with [`display_width`].
#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    text: &'a str,
    width: usize,
}

impl<'a> Word<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            width: display_width(text),
        }
    }
}

impl Fragment for Word<'_> {
    fn width(&self) -> f64 {
        self.width as f64
    }

    // Linearized words are always separated by exactly one space.
    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

impl From<usize> for WrapOptions<'_> {
    fn from(width: usize) -> Self {
        Self::new(width)
    }
}

/// Linearizes `text` and wraps the result to at most `width` columns.
///
/// Lines are joined with `\n`. A word wider than `width` is never split:
/// it is placed alone on its own line instead.
///
/// # Example
///
/// ```rust
/// use puprelease_render::rewrap;
///
/// let text = "
///     Bump the version,
///     tag the release.
/// ";
/// assert_eq!(rewrap(text, 20), "Bump the version,\ntag the release.");
/// assert_eq!(rewrap("a supercalifragilistic word", 8), "a\nsupercalifragilistic\nword");
/// ```
pub fn rewrap(text: &str, width: usize) -> String {
    rewrap_with(text, WrapOptions::new(width))
}

/// Like [`rewrap`], with extra formatting options passed to the wrapper.
///
/// ```rust
/// use puprelease_render::{rewrap_with, WrapOptions};
///
/// let opts = WrapOptions::new(12).subsequent_indent("  ");
/// assert_eq!(rewrap_with("one two three four", opts), "one two\n  three four");
/// ```
pub fn rewrap_with<'a>(text: &str, options: impl Into<WrapOptions<'a>>) -> String {
    let options = options.into();
    let oneline = linearize(text);
    if oneline.is_empty() {
        return oneline;
    }

    let words: Vec<Word<'_>> = oneline.split(' ').map(Word::new).collect();
    let lines = wrap_first_fit(&words, &options.line_widths());

    let mut result = String::with_capacity(oneline.len());
    for (idx, line) in lines.iter().enumerate() {
        if idx == 0 {
            result.push_str(options.initial_indent);
        } else {
            result.push('\n');
            result.push_str(options.subsequent_indent);
        }
        for (pos, word) in line.iter().enumerate() {
            if pos > 0 {
                result.push(' ');
            }
            result.push_str(word.text);
        }
    }
    result
}

/// Returns the display width of `s` in terminal columns.
///
/// Wide characters count as two columns. Control characters, including the
/// escape that starts an ANSI sequence, count as one column each, so escape
/// sequences are measured like any other text.
///
/// ```rust
/// use puprelease_render::display_width;
///
/// assert_eq!(display_width("\x1b[1mbold\x1b[0m"), 12);
/// ```
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(1)).sum()
}

/// Pads `s` on the right with spaces up to `width` display columns.
///
/// Strings already at least `width` wide are returned unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + width - current);
    result.push_str(s);
    result.extend(std::iter::repeat(' ').take(width - current));
    result
}
