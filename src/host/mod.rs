//! Host module for process execution

pub mod command_runner;

pub use command_runner::{exit_code_of, CommandError, CommandOutput, CommandRunner};
