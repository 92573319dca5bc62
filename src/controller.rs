//! pg_ctl Controller
//!
//! Wraps the `pg_ctl` management utility for a single data directory.
//! See <https://www.postgresql.org/docs/current/static/app-pg-ctl.html>.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::host::CommandRunner;
use crate::status::{StatusResult, NOT_RUNNING_EXIT_CODE};

/// Server options passed through `-o` by [`Controller::is_started`]
const IS_STARTED_SERVER_OPTIONS: &str = "-c unix_socket_directories=/tmp";

/// Issues `pg_ctl` calls against a particular data directory
#[derive(Debug, Clone)]
pub struct Controller {
    data_dir: PathBuf,
    config: ControllerConfig,
}

impl Controller {
    /// Controller using the default `pg_ctl` location
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(data_dir, ControllerConfig::default())
    }

    pub fn with_config(data_dir: impl Into<PathBuf>, config: ControllerConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Run a vanilla `pg_ctl status -w -D <data_dir>` and wait for it.
    ///
    /// A non-zero exit is not an error. It shows up in
    /// [`StatusResult::error_code`] while the remaining fields come from
    /// stdout alone. An error means no exit code was obtainable, and its
    /// [`ControllerError::error_code`] is the internal-failure sentinel.
    pub fn status(&self) -> Result<StatusResult, ControllerError> {
        let output = self.runner().run(&self.config.pg_ctl_bin, self.status_args())?;

        Ok(StatusResult::from_output(output.exit_code, output.stdout, output.stderr))
    }

    /// Report whether a postgres instance has started against the data directory.
    ///
    /// Exit code 3 means not started. Any other non-zero exit is an error.
    #[deprecated(note = "use `Controller::status` and `StatusResult::is_server_running` instead")]
    pub fn is_started(&self) -> Result<bool, ControllerError> {
        let mut args = self.status_args();
        args.push("-o".into());
        args.push(IS_STARTED_SERVER_OPTIONS.into());

        let output = self.runner().run_combined(&self.config.pg_ctl_bin, args)?;

        match output.exit_code {
            0 => Ok(true),
            NOT_RUNNING_EXIT_CODE => Ok(false),
            code => Err(ControllerError::InstanceState {
                code,
                output: output.stdout,
            }),
        }
    }

    /// [`Controller::status`] on the blocking thread pool
    pub async fn status_async(&self) -> Result<StatusResult, ControllerError> {
        let controller = self.clone();
        tokio::task::spawn_blocking(move || controller.status()).await?
    }

    /// [`Controller::is_started`] on the blocking thread pool
    #[deprecated(note = "use `Controller::status_async` instead")]
    #[allow(deprecated)]
    pub async fn is_started_async(&self) -> Result<bool, ControllerError> {
        let controller = self.clone();
        tokio::task::spawn_blocking(move || controller.is_started()).await?
    }

    fn runner(&self) -> CommandRunner {
        CommandRunner::new().with_envs(&self.config.env)
    }

    fn status_args(&self) -> Vec<OsString> {
        vec![
            "status".into(),
            "-w".into(),
            "-D".into(),
            self.data_dir.clone().into_os_string(),
        ]
    }
}
