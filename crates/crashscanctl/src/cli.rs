//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// crashscan CLI
#[derive(Parser, Debug)]
#[command(name = "crashscanctl")]
#[command(about = "Detect and triage kernel crashes in captured console logs", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $CRASHSCAN_CONFIG and ~/.config/crashscan/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Target system (overrides the config file)
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse console logs and print a crash report per file
    Scan {
        /// Log files ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Only check whether each log contains a crash signature
    Detect {
        /// Log files ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List supported target systems
    Targets,
}
