//! engine::driver
//!
//! Prints an assembled command and, unless this is a dry run, executes it.
//!
//! The child inherits ict's stdin, stdout and stderr, so test output streams
//! live instead of being collected. Its exit code is returned untouched.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

use super::assemble::ArgumentVector;

/// Header printed before the command line.
pub const COMMAND_HEADER: &str = "Raw Bazel command to be invoked:";

/// Errors from launching the runner.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The argument vector has no program.
    #[error("nothing to run: empty command")]
    EmptyCommand,

    /// The program could not be started.
    #[error("failed to launch `{program}`")]
    Spawn {
        /// The program that failed to start
        program: String,
        /// The underlying OS error
        source: io::Error,
    },

    /// The command line could not be printed.
    #[error("failed to print command")]
    Output(#[source] io::Error),
}

/// Exit status of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitResult {
    code: i32,
}

impl ExitResult {
    /// A successful result (exit code 0).
    pub fn success() -> Self {
        Self { code: 0 }
    }

    /// The exit code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Whether the exit code is zero.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

impl From<ExitStatus> for ExitResult {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self { code: 128 + signal };
            }
        }
        Self { code: 1 }
    }
}

/// Print `argv` to `out`, then run it unless `dry_run` is set.
///
/// The runner starts in `dir` when given, else in ict's own working
/// directory.
///
/// # Errors
///
/// Returns `LaunchError` if the command cannot be printed or started. A
/// command that starts and exits non-zero is not an error: its code is in
/// the returned `ExitResult`.
pub fn invoke(
    argv: &ArgumentVector,
    dry_run: bool,
    dir: Option<&Path>,
    out: &mut dyn Write,
) -> Result<ExitResult, LaunchError> {
    writeln!(out, "{COMMAND_HEADER}\n$ {argv}").map_err(LaunchError::Output)?;
    // The child writes to the same terminal; the header must come first.
    out.flush().map_err(LaunchError::Output)?;

    if dry_run {
        debug!("dry run, not executing");
        return Ok(ExitResult::success());
    }

    let program = argv.program().ok_or(LaunchError::EmptyCommand)?;
    debug!(%program, args = argv.args().len(), dir = ?dir, "spawning runner");

    let mut cmd = Command::new(program);
    cmd.args(argv.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let status = cmd
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let result = ExitResult::from(status);
    debug!(code = result.code(), "runner exited");
    Ok(result)
}
