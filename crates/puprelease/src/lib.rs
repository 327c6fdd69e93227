//! # puprelease
//!
//! Command-line layer of the `puprelease` release tool: version lookup, the
//! version banner, and the mapping from command outcomes to exit codes.
//!
//! Text layout lives in [`puprelease_render`]; running external programs
//! lives in [`puprelease_shell`].

pub mod cli;
pub mod error;
pub mod logging;
pub mod version;

pub use cli::{report, run, Cli, Command};
pub use error::{CliError, CliResult, ExitSignal};
pub use version::{
    print_own_version, GitVersion, PackageVersion, ResolvedVersion, VersionChain,
    VersionProvider,
};
