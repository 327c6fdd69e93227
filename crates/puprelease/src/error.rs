//! Error vocabulary shared by the CLI layer.

use puprelease_render::RenderError;
use puprelease_shell::ShellError;
use thiserror::Error;

/// Exit code used for [`ExitSignal`] unless another one is given.
pub const DEFAULT_EXIT_CODE: u8 = 1;

/// Exit code used for unexpected failures.
pub const FAILURE_EXIT_CODE: u8 = 2;

/// A request to stop the program cleanly, optionally explaining why.
///
/// Commands return this through [`CliError::Exit`] instead of terminating
/// the process themselves; `main` prints the message and exits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("exit requested"))]
pub struct ExitSignal {
    pub message: Option<String>,
    pub code: u8,
}

impl ExitSignal {
    /// An exit without a message.
    pub fn new() -> Self {
        Self {
            message: None,
            code: DEFAULT_EXIT_CODE,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            code: DEFAULT_EXIT_CODE,
        }
    }

    pub fn code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }
}

impl Default for ExitSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Exit(#[from] ExitSignal),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error("could not determine the puprelease version")]
    VersionUnavailable,
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Exit(signal) => signal.code,
            _ => FAILURE_EXIT_CODE,
        }
    }
}

pub type CliResult<T = ()> = Result<T, CliError>;
