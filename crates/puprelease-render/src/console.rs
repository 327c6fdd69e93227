//! Line-oriented console writer.
//!
//! [`Console`] wraps any [`Write`] destination (standard output by default)
//! and rewraps messages to the console width before writing them, unless
//! the write is raw.
//!
//! ```rust
//! use puprelease_render::{Console, EchoOptions};
//!
//! let mut console = Console::new(Vec::new()).with_width(20);
//! console.echo("Collecting   the\n   release notes now").unwrap();
//! console.write("  kept   as is", &EchoOptions::default().raw()).unwrap();
//!
//! let out = String::from_utf8(console.into_inner()).unwrap();
//! assert_eq!(out, "Collecting the\nrelease notes now\n  kept   as is\n");
//! ```

use std::io::{self, Stdout, Write};

use crate::error::RenderError;
use crate::text::{display_width, rewrap, MAX_LINEWIDTH};

/// Per-write options for [`Console::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoOptions {
    /// Append a trailing newline.
    pub newline: bool,
    /// Write the message verbatim, skipping the rewrap step.
    pub raw: bool,
    /// Wrap width used when `raw` is false.
    pub width: usize,
}

impl Default for EchoOptions {
    fn default() -> Self {
        Self {
            newline: true,
            raw: false,
            width: MAX_LINEWIDTH,
        }
    }
}

impl EchoOptions {
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn no_newline(mut self) -> Self {
        self.newline = false;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// A console that rewraps what it writes.
///
/// Every write is flushed immediately so output interleaves correctly with
/// subprocesses sharing the same terminal.
pub struct Console<W: Write = Stdout> {
    out: W,
    width: usize,
}

impl Console<Stdout> {
    /// Creates a console writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for Console<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: MAX_LINEWIDTH,
        }
    }

    /// Sets the wrap width used by [`echo`](Self::echo) and
    /// [`print_header`](Self::print_header).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Options for a regular, rewrapped line at this console's width.
    pub fn options(&self) -> EchoOptions {
        EchoOptions::default().width(self.width)
    }

    /// Writes `message` as one or more lines.
    ///
    /// Non-raw messages are linearized and rewrapped at `options.width`
    /// first.
    pub fn write(&mut self, message: &str, options: &EchoOptions) -> Result<(), RenderError> {
        if options.raw {
            self.out.write_all(message.as_bytes())?;
        } else {
            self.out
                .write_all(rewrap(message, options.width).as_bytes())?;
        }
        if options.newline {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Writes a rewrapped line at the console width.
    pub fn echo(&mut self, message: &str) -> Result<(), RenderError> {
        let options = self.options();
        self.write(message, &options)
    }

    /// Writes a line verbatim.
    pub fn echo_raw(&mut self, message: &str) -> Result<(), RenderError> {
        self.write(message, &EchoOptions::default().raw())
    }

    /// Writes a blank line, `header`, then a dashed underline as long as
    /// `header`.
    pub fn print_header(&mut self, header: &str) -> Result<(), RenderError> {
        self.echo("")?;
        self.echo(header)?;
        self.echo(&"-".repeat(display_width(header)))
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
