//! Command-line entry points.
//!
//! Commands write through a [`Console`] and report failure by returning a
//! [`CliError`]. Only [`report`] decides what a failure looks like on the
//! terminal and which exit code it maps to.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use puprelease_render::{Console, KeyValueTable, MAX_LINEWIDTH};

use crate::error::{CliError, CliResult};
use crate::version::{print_own_version, VersionChain};

/// Key column width used by `puprelease info`.
const INFO_KEY_WIDTH: usize = 16;

/// Narrowest console `--width` accepted; leaves room for the info table.
const MIN_WIDTH: usize = 20;

#[derive(Parser, Debug, Clone)]
#[command(name = "puprelease", about = "Release helper for Python packages")]
pub struct Cli {
    /// Maximum width of console output
    #[arg(long, default_value_t = MAX_LINEWIDTH, value_parser = parse_width)]
    pub width: usize,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Source checkout used when the package version is unknown
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the puprelease version banner (default)
    Version,
    /// Show where the version comes from and how output is laid out
    Info,
}

fn parse_width(s: &str) -> Result<usize, String> {
    let width: usize = s.parse().map_err(|e| format!("{}", e))?;
    if width < MIN_WIDTH {
        return Err(format!("width must be at least {}", MIN_WIDTH));
    }
    Ok(width)
}

/// Runs the selected command, writing regular output to `console`.
pub fn run<W: Write>(cli: &Cli, console: &mut Console<W>) -> CliResult {
    let chain = VersionChain::standard(&cli.repo);
    match cli.command.as_ref().unwrap_or(&Command::Version) {
        Command::Version => print_own_version(console, &chain),
        Command::Info => print_info(cli, &chain, console),
    }
}

fn print_info<W: Write>(cli: &Cli, chain: &VersionChain, console: &mut Console<W>) -> CliResult {
    let resolved = chain.resolve().ok_or(CliError::VersionUnavailable)?;

    console.print_header("puprelease")?;
    let table = KeyValueTable::new(INFO_KEY_WIDTH).total_width(cli.width);
    table.print_row(console, "Version", &resolved.version)?;
    table.print_row(console, "Version source", resolved.source)?;
    table.print_row(console, "Repository", &cli.repo.display().to_string())?;
    table.print_row(console, "Output width", &cli.width.to_string())?;
    Ok(())
}

/// Prints the outcome of [`run`] to `errors` and returns the exit code.
///
/// An [`ExitSignal`](crate::ExitSignal) prints only its message, if any.
/// Other failures are prefixed with `Error:`.
pub fn report<W: Write>(result: CliResult, errors: &mut Console<W>) -> u8 {
    let err = match result {
        Ok(()) => return 0,
        Err(err) => err,
    };

    let printed = match &err {
        CliError::Exit(signal) => match &signal.message {
            Some(message) => errors.echo(message),
            None => Ok(()),
        },
        other => errors.echo(&format!("Error: {}", other)),
    };
    if let Err(write_err) = printed {
        tracing::error!(error = %write_err, "could not report failure");
    }
    err.exit_code()
}
