use anyhow::Result;

use super::{ProjectReport, compile_project};
use crate::cli::args::CheckCommand;

/// Compile the project but keep only the failures: `check` is the CI-facing
/// variant of `compile`.
pub fn check(cmd: CheckCommand) -> Result<ProjectReport> {
    let mut report = compile_project(&cmd.args.common)?;
    report.sites.clear();
    Ok(report)
}
