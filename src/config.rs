//! Controller configuration

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default location of the control utility
pub const DEFAULT_PG_CTL_BIN: &str = "/usr/local/gpdb/bin/pg_ctl";

/// How the controller invokes `pg_ctl`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Path to the `pg_ctl` executable. A bare name is looked up in PATH.
    pub pg_ctl_bin: PathBuf,
    /// Extra environment variables for the child process
    pub env: BTreeMap<String, String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pg_ctl_bin: PathBuf::from(DEFAULT_PG_CTL_BIN),
            env: BTreeMap::new(),
        }
    }
}

impl ControllerConfig {
    pub fn with_pg_ctl_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.pg_ctl_bin = path.into();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}
