//! `pgctl is-started`

use std::path::PathBuf;

use clap::Args;
use pgctl::{Controller, ControllerConfig};

use super::exit_codes;

#[derive(Debug, Args)]
pub struct IsStartedArgs {
    /// Data directory to query
    #[arg(short = 'D', long = "data-dir")]
    pub data_dir: PathBuf,
}

pub fn run(args: IsStartedArgs, config: ControllerConfig) -> anyhow::Result<i32> {
    let controller = Controller::with_config(&args.data_dir, config);

    #[allow(deprecated)]
    let started = controller.is_started()?;

    if started {
        println!("started");
        Ok(exit_codes::SUCCESS)
    } else {
        println!("not started");
        Ok(exit_codes::NOT_RUNNING)
    }
}
