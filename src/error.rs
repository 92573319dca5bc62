//! Controller errors

use thiserror::Error;

use crate::host::CommandError;
use crate::status::{StatusResult, INTERNAL_ERROR_CODE};

/// Errors returned by [`crate::Controller`] operations
#[derive(Debug, Error)]
pub enum ControllerError {
    /// `pg_ctl` could not be run to completion with an exit code
    #[error("failed to run pg_ctl: {0}")]
    Command(#[from] CommandError),

    /// `pg_ctl` exited with a code that has no meaning for the caller
    #[error("cannot get instance state: exit status {code}")]
    InstanceState {
        code: i32,
        /// Combined stdout/stderr of the failed call
        output: String,
    },

    /// The blocking task running `pg_ctl` did not complete
    #[error("pg_ctl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ControllerError {
    /// Exit code to report for this failure
    pub fn error_code(&self) -> i32 {
        match self {
            ControllerError::InstanceState { code, .. } => *code,
            ControllerError::Command(_) | ControllerError::Task(_) => INTERNAL_ERROR_CODE,
        }
    }

    /// Status record standing in for this failure
    ///
    /// Only the exit code is set. Failures with no OS exit code carry the
    /// internal-failure sentinel.
    pub fn status_result(&self) -> StatusResult {
        match self {
            ControllerError::InstanceState { code, .. } => StatusResult {
                error_code: *code,
                ..StatusResult::default()
            },
            ControllerError::Command(_) | ControllerError::Task(_) => StatusResult::internal_failure(),
        }
    }
}
