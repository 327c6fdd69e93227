use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Command line is empty")]
    EmptyCommand,
    #[error("IO error running `{0}`: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{0}` failed with status {1}")]
    CommandFailed(String, ExitStatus),
    #[error("Command `{0}` output was not valid UTF-8")]
    InvalidUtf8(String, #[source] std::string::FromUtf8Error),
}

/// Runs `argv` and returns its standard output, decoded and trimmed.
///
/// The first element is the program, the rest are its arguments. No shell
/// is involved, so arguments need no quoting. Standard error is inherited.
///
/// # Example
///
/// ```rust,no_run
/// use puprelease_shell::run_command;
///
/// let branch = run_command(&["git", "rev-parse", "--abbrev-ref", "HEAD"])?;
/// println!("on branch {}", branch);
/// # Ok::<(), puprelease_shell::ShellError>(())
/// ```
pub fn run_command<S: AsRef<OsStr>>(argv: &[S]) -> Result<String, ShellError> {
    run(argv, None, None)
}

/// Like [`run_command`], with `dir` as the working directory.
pub fn run_command_in<S: AsRef<OsStr>>(dir: &Path, argv: &[S]) -> Result<String, ShellError> {
    run(argv, Some(dir), None)
}

/// Like [`run_command`], killing the process if it runs longer than
/// `timeout`.
///
/// # Notes
///
/// Output is only read once the process has exited. A command producing
/// more output than the pipe buffer holds will block until the timeout.
pub fn run_command_with_timeout<S: AsRef<OsStr>>(
    argv: &[S],
    timeout: Duration,
) -> Result<String, ShellError> {
    run(argv, None, Some(timeout))
}

fn run<S: AsRef<OsStr>>(
    argv: &[S],
    dir: Option<&Path>,
    timeout: Option<Duration>,
) -> Result<String, ShellError> {
    let (program, args) = argv.split_first().ok_or(ShellError::EmptyCommand)?;
    let command_line = display_command(argv);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    tracing::debug!(command = %command_line, ?dir, "running command");
    let io_err = |err| ShellError::Io(command_line.clone(), err);

    let stdout = match timeout {
        Some(duration) => {
            let mut child = cmd.spawn().map_err(io_err)?;
            match child.wait_timeout(duration).map_err(io_err)? {
                Some(status) if !status.success() => {
                    return Err(ShellError::CommandFailed(command_line, status));
                }
                Some(_) => {}
                None => {
                    child.kill().map_err(io_err)?;
                    child.wait().map_err(io_err)?;
                    return Err(ShellError::Timeout(command_line, duration));
                }
            }
            let mut buf = Vec::new();
            if let Some(mut out) = child.stdout.take() {
                out.read_to_end(&mut buf).map_err(io_err)?;
            }
            buf
        }
        None => {
            let output = cmd.output().map_err(io_err)?;
            if !output.status.success() {
                return Err(ShellError::CommandFailed(command_line, output.status));
            }
            output.stdout
        }
    };

    let text = String::from_utf8(stdout).map_err(|e| ShellError::InvalidUtf8(command_line, e))?;
    Ok(text.trim().to_string())
}

fn display_command<S: AsRef<OsStr>>(argv: &[S]) -> String {
    argv.iter()
        .map(|arg| arg.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_echo_is_trimmed() {
        let output = run_command(&["echo", "  hello  "]).unwrap();
        assert_eq!(output, "hello");
    }

    #[test]
    fn test_debug_log_names_command() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let output =
            tracing::subscriber::with_default(subscriber, || run_command(&["echo", "hello"]))
                .unwrap();
        assert_eq!(output, "hello");

        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("running command"), "{}", logged);
        assert!(logged.contains("command=echo hello"), "{}", logged);
    }

    #[test]
    fn test_empty_argv() {
        let argv: [&str; 0] = [];
        assert!(matches!(run_command(&argv), Err(ShellError::EmptyCommand)));
    }

    #[test]
    fn test_missing_program() {
        let res = run_command(&["puprelease-no-such-program"]);
        match res {
            Err(ShellError::Io(cmd, _)) => assert_eq!(cmd, "puprelease-no-such-program"),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failed_includes_command_line() {
        let res = run_command(&["sh", "-c", "exit 3"]);
        match res {
            Err(ShellError::CommandFailed(cmd_str, status)) => {
                assert_eq!(cmd_str, "sh -c exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("Expected CommandFailed error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command_in(dir.path(), &["pwd", "-P"]).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(Path::new(&output), expected.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout() {
        let start = std::time::Instant::now();
        let res = run_command_with_timeout(&["sleep", "2"], Duration::from_millis(300));
        assert!(matches!(res, Err(ShellError::Timeout(_, _))));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_not_reached() {
        let output =
            run_command_with_timeout(&["echo", "done"], Duration::from_secs(5)).unwrap();
        assert_eq!(output, "done");
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8() {
        let res = run_command(&["printf", "\\377"]);
        assert!(matches!(res, Err(ShellError::InvalidUtf8(_, _))));
    }

    #[test]
    fn test_display_command() {
        assert_eq!(display_command(&["git", "describe", "--tags"]), "git describe --tags");
    }
}
