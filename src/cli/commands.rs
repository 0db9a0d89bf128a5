//! CLI command definitions using clap.
//!
//! With no subcommand the interactive session starts. Subcommands:
//! - tools: list the tool registry
//! - step: decode a step document offline

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stepr - a plan/act/observe coding agent
#[derive(Parser, Debug)]
#[command(name = "stepr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model to request, overriding the config file
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tools available to action steps
    Tools,

    /// Parse a step JSON document and show how it would be dispatched
    Step {
        /// File containing the step, or `-` for stdin
        path: PathBuf,
    },
}
