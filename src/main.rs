//! pgctl - query `pg_ctl` for the state of a data directory
//!
//! - `pgctl status -D <dir>` prints the parsed `pg_ctl status` report and
//!   exits with pg_ctl's own exit code
//! - `pgctl is-started -D <dir>` exits 0 when started, 3 when not

mod cli;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};
use pgctl::{logging, ControllerError};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let config = cli.controller_config();

    match cli.command {
        Commands::Status(args) => match cli::status::run(args, config) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                categorize_error(&e)
            }
        },
        Commands::IsStarted(args) => match cli::is_started::run(args, config) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_codes::UNEXPECTED_FAILURE
            }
        },
    }
}

/// Map a status failure to the exit code it stands for
fn categorize_error(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<ControllerError>() {
        Some(err) => err.error_code(),
        None => exit_codes::UNEXPECTED_FAILURE,
    }
}
