//! Command-line interface

pub mod is_started;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pgctl::{ControllerConfig, DEFAULT_PG_CTL_BIN};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const NOT_RUNNING: i32 = pgctl::NOT_RUNNING_EXIT_CODE;
}

#[derive(Debug, Parser)]
#[command(name = "pgctl", version, about = "Query pg_ctl for the state of a data directory")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Path to the pg_ctl executable
    #[arg(long, global = true, env = "PG_CTL_BIN", default_value = DEFAULT_PG_CTL_BIN)]
    pub pg_ctl_bin: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::default().with_pg_ctl_bin(&self.pg_ctl_bin)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run `pg_ctl status` and print the parsed result
    Status(status::StatusArgs),
    /// Check whether a server has started (exit 0) or not (exit 3)
    IsStarted(is_started::IsStartedArgs),
}
