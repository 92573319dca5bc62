//! `pgctl status`

use std::path::PathBuf;

use clap::Args;
use pgctl::{Controller, ControllerConfig, StatusResult};

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Data directory to query
    #[arg(short = 'D', long = "data-dir")]
    pub data_dir: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run `pg_ctl status` and print the result, returning pg_ctl's exit code
///
/// With `--json`, a failure still prints the record carrying its exit code.
pub fn run(args: StatusArgs, config: ControllerConfig) -> anyhow::Result<i32> {
    let controller = Controller::with_config(&args.data_dir, config);
    let result = match controller.status() {
        Ok(result) => result,
        Err(err) => {
            if args.json {
                println!("{}", render(&err.status_result(), true)?);
            }
            return Err(err.into());
        }
    };

    tracing::debug!(data_dir = %args.data_dir.display(), %result, "status complete");

    println!("{}", render(&result, args.json)?);
    Ok(result.error_code)
}

fn render(result: &StatusResult, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    let mut out = String::new();
    if result.is_server_running {
        out.push_str(&format!("Server: running (PID: {})\n", result.pid));
        out.push_str(&format!("Command: {}", result.ps_postgres));
    } else {
        out.push_str("Server: not running");
    }
    if !result.raw_stderr.trim().is_empty() {
        out.push_str(&format!("\nStderr: {}", result.raw_stderr.trim()));
    }
    Ok(out)
}
