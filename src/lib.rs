//! pgctl - wrapper around the `pg_ctl` management utility
//!
//! Runs `pg_ctl` as a subprocess against one data directory and turns its
//! textual report into a [`StatusResult`].

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod logging;
pub mod status;

pub use config::{ControllerConfig, DEFAULT_PG_CTL_BIN};
pub use controller::Controller;
pub use error::ControllerError;
pub use status::{parse_status_output, ParsedStatus, StatusResult, INTERNAL_ERROR_CODE, NOT_RUNNING_EXIT_CODE};
