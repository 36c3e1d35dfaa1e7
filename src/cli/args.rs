//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `compile`: Compile every macro call site and report the descriptors
//! - `check`: Compile and report only the call sites that fail
//! - `init`: Initialize a lingo configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::compiler::Mode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Compile(cmd)) => cmd.args.common.verbose,
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by the compiling commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory to scan
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output mode (overrides config file)
    #[arg(long, value_enum, env = "LINGO_MODE")]
    pub mode: Option<Mode>,

    /// Keep full descriptor metadata even in production mode
    #[arg(long)]
    pub extract: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CompileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the compiled descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CompileCommand {
    #[command(flatten)]
    pub args: CompileArgs,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile macro call sites and report the resulting message descriptors
    Compile(CompileCommand),
    /// Report macro call sites that fail to compile
    Check(CheckCommand),
    /// Initialize a new .lingorc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
