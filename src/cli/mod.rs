//! Command-line interface layer.

use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
mod report;
mod run;
mod scan;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args, verbose)
}
