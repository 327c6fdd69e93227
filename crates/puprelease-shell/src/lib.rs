//! Subprocess helpers for `puprelease`.
//!
//! Release steps shell out to tools such as `git`. [`run_command`] runs a
//! program with its arguments and hands back trimmed standard output, so
//! callers can use the result directly as a value.

pub mod shell;

pub use shell::{run_command, run_command_in, run_command_with_timeout, ShellError};
