//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Count key usages across the source tree and write a report
//! - `init`: Initialize keytally configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::writer::OutputFormat;

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

    /// Get the verbose flag from the command's args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Key source document: .yaml/.yml with a `keys:` mapping, or .json (overrides config file)
    #[arg(short, long, env = "KEYTALLY_KEYS")]
    pub keys: Option<PathBuf>,

    /// Source code root directory (overrides config file)
    #[arg(long, env = "KEYTALLY_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Include only unused keys in the output
    #[arg(long)]
    pub unused_only: bool,

    /// Output file, `-` for stdout [default: output.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (overrides config file) [default: json]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// File extension to scan (overrides config file)
    /// Can be specified multiple times: -e tsx -e ts
    #[arg(short, long = "extension")]
    pub extensions: Vec<String>,

    /// Number of worker threads [default: one per CPU]
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Exit with status 1 when unused keys are found
    #[arg(long)]
    pub deny_unused: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count how often each known key occurs in the source tree
    Scan(ScanCommand),
    /// Initialize a new .keytallyrc.json configuration file
    Init,
}
