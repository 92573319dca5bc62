//! Command Runner
//!
//! Executes the control utility and captures its output.
//! Each call spawns exactly one child process and blocks until it exits.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Captured output of a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured stdout (stdout followed by stderr for combined runs)
    pub stdout: String,
    /// Captured stderr (empty for combined runs)
    pub stderr: String,
    /// Exit code reported by the OS
    pub exit_code: i32,
}

/// Command runner errors
///
/// Every variant means no OS exit code could be obtained for the child.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Binary not found on disk or in PATH
    #[error("binary '{0}' not found")]
    BinaryNotFound(String),

    /// Failed to launch the process or collect its output
    #[error("failed to launch '{binary}': {source}")]
    LaunchFailed {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Process ended without an exit code
    #[error("process terminated by signal{}", .0.map(|s| format!(" {}", s)).unwrap_or_default())]
    Signaled(Option<i32>),
}

/// Command runner for executing the control utility
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Environment variables to add
    env_additions: BTreeMap<String, String>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every variable from a map
    pub fn with_envs<'a>(mut self, vars: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (k, v) in vars {
            self.env_additions.insert(k.clone(), v.clone());
        }
        self
    }

    /// Resolve the binary that will actually be spawned.
    ///
    /// A path with a separator is used as given. A bare name is always looked
    /// up in PATH, even when a file of that name sits in the working directory.
    pub fn resolve(binary: &Path) -> Result<PathBuf, CommandError> {
        let not_found = || CommandError::BinaryNotFound(binary.display().to_string());

        if binary.components().count() > 1 {
            return if binary.exists() {
                Ok(binary.to_path_buf())
            } else {
                Err(not_found())
            };
        }

        which::which(binary).map_err(|_| not_found())
    }

    /// Run a command, capturing stdout and stderr separately
    pub fn run<I, S>(&self, binary: &Path, args: I) -> Result<CommandOutput, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.command(binary, args)?.output().map_err(|e| launch_error(binary, e))?;
        let exit_code = exit_code_of(output.status)?;

        tracing::debug!(binary = %binary.display(), exit_code, "command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }

    /// Run a command, folding stderr into the returned stdout text
    pub fn run_combined<I, S>(&self, binary: &Path, args: I) -> Result<CommandOutput, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let separate = self.run(binary, args)?;
        let mut combined = separate.stdout;
        combined.push_str(&separate.stderr);

        Ok(CommandOutput {
            stdout: combined,
            stderr: String::new(),
            exit_code: separate.exit_code,
        })
    }

    fn command<I, S>(&self, binary: &Path, args: I) -> Result<Command, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let binary_path = Self::resolve(binary)?;

        let mut cmd = Command::new(&binary_path);
        cmd.args(args);
        cmd.envs(&self.env_additions);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(binary = %binary_path.display(), args = ?cmd.get_args().collect::<Vec<_>>(), "spawning command");

        Ok(cmd)
    }
}

fn launch_error(binary: &Path, source: std::io::Error) -> CommandError {
    CommandError::LaunchFailed {
        binary: binary.display().to_string(),
        source,
    }
}

/// Extract the OS exit code from a wait status
///
/// A status with no code (the child was killed by a signal) is an error.
pub fn exit_code_of(status: ExitStatus) -> Result<i32, CommandError> {
    match status.code() {
        Some(code) => Ok(code),
        None => Err(CommandError::Signaled(signal_of(status))),
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}
