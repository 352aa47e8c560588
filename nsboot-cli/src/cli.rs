//! CLI argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nsboot")]
#[command(about = "Enter a network namespace before the runtime starts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit with an error if namespace setup fails
    #[arg(long, global = true)]
    pub strict: bool,

    /// Read the activation flag from _RUNWASI_PHASE instead of _RUNWASI_SANDBOX
    #[arg(long, global = true)]
    pub phase: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show bootstrap status and network namespace identity
    Show {
        /// Process ID (default: current process)
        #[arg(short, long)]
        pid: Option<i32>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stay in the namespace until interrupted
    Hold,

    /// Replace this process with a command running in the namespace
    Exec {
        /// Command to run
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
}
