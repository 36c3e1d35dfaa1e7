//! Command dispatch for the lingo CLI.

use std::{fs, path::Path};

use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{ProjectReport, check::check, compile::compile};
use super::exit_status::ExitStatus;
use super::report;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn run(Arguments { command }: Arguments, verbose: bool) -> Result<ExitStatus> {
    match command {
        Some(Command::Compile(cmd)) => {
            let outcome = compile(cmd)?;
            if outcome.json {
                report::print_json(&outcome.report)?;
            } else {
                report::print(&outcome.report, true, verbose);
            }
            Ok(status_of(&outcome.report))
        }
        Some(Command::Check(cmd)) => {
            let result = check(cmd)?;
            report::print(&result, false, verbose);
            Ok(status_of(&result))
        }
        Some(Command::Init) => {
            init()?;
            Ok(ExitStatus::Success)
        }
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn status_of(report: &ProjectReport) -> ExitStatus {
    if report.has_errors() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
