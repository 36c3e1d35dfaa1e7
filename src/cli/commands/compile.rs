use anyhow::Result;

use super::{ProjectReport, compile_project};
use crate::cli::args::CompileCommand;

pub struct CompileOutcome {
    pub report: ProjectReport,
    pub json: bool,
}

pub fn compile(cmd: CompileCommand) -> Result<CompileOutcome> {
    let report = compile_project(&cmd.args.common)?;
    Ok(CompileOutcome {
        report,
        json: cmd.args.json,
    })
}
