//! `pg_ctl status` results
//!
//! Parses the human-readable report printed by `pg_ctl status`:
//!
//! ```text
//! pg_ctl: server is running (PID: 4821)
//! /usr/local/bin/postgres "-D" "/data"
//! ```
//!
//! The parsing is line-oriented and intentionally literal. Callers depend on
//! the exact substring and pattern matches below, so keep them as they are.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Exit code reported when no OS exit status could be obtained
pub const INTERNAL_ERROR_CODE: i32 = 127;

/// Exit code `pg_ctl status` uses when no server is running
pub const NOT_RUNNING_EXIT_CODE: i32 = 3;

const RUNNING_MARKER: &str = "server is running";

static PID_REGEX: OnceLock<Regex> = OnceLock::new();

fn pid_regex() -> &'static Regex {
    PID_REGEX.get_or_init(|| Regex::new(r"PID: (\d+)").expect("PID pattern is valid"))
}

/// Result of a `pg_ctl status` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// Exit code of `pg_ctl status`.
    ///
    /// Always set. [`INTERNAL_ERROR_CODE`] marks an internal failure.
    pub error_code: i32,

    /// The command's stdout. A missing server is reported here too.
    pub raw_stdout: String,

    /// The command's stderr (unrecognized flags or worse)
    pub raw_stderr: String,

    /// True only if a postgres process was found for the data directory
    pub is_server_running: bool,

    /// PID of that postgres process, 0 if none was reported
    pub pid: i64,

    /// The command line that started postgres
    pub ps_postgres: String,
}

impl StatusResult {
    /// Record carrying only the internal-failure sentinel
    pub fn internal_failure() -> Self {
        Self {
            error_code: INTERNAL_ERROR_CODE,
            ..Self::default()
        }
    }

    /// Build a result from a finished `pg_ctl status` run
    pub fn from_output(error_code: i32, stdout: String, stderr: String) -> Self {
        let parsed = parse_status_output(&stdout);
        Self {
            error_code,
            raw_stdout: stdout,
            raw_stderr: stderr,
            is_server_running: parsed.is_server_running,
            pid: parsed.pid,
            ps_postgres: parsed.ps_postgres,
        }
    }
}

impl std::fmt::Display for StatusResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_server_running {
            write!(f, "running, PID: {}", self.pid)?;
        } else {
            write!(f, "not running")?;
        }
        write!(f, ", exit code: {}", self.error_code)
    }
}

/// Fields extracted from `pg_ctl status` stdout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatus {
    pub is_server_running: bool,
    pub pid: i64,
    pub ps_postgres: String,
}

/// Parse `pg_ctl status` stdout.
///
/// Only the first two lines matter. A running server is detected from line
/// one, and line two is read only when the server is running. Missing lines
/// are empty, and a missing PID is 0.
pub fn parse_status_output(stdout: &str) -> ParsedStatus {
    let mut lines = stdout.split_inclusive('\n');
    let first_line = lines.next().unwrap_or("");

    let is_server_running = first_line.contains(RUNNING_MARKER);

    let pid = pid_regex()
        .captures(first_line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    let ps_postgres = if is_server_running {
        lines.next().unwrap_or("").trim().to_string()
    } else {
        String::new()
    };

    ParsedStatus {
        is_server_running,
        pid,
        ps_postgres,
    }
}
