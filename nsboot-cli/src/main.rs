//! nsboot CLI
//!
//! Enters the network namespace requested by the parent launcher, then starts
//! the async runtime and runs a subcommand inside that namespace.

use std::io::IsTerminal;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use nsboot_namespace::{bootstrap, EnvKeys, FailurePolicy, NamespaceConfig, NetnsReady};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "NSBOOT_LOG";

fn main() {
    // Nothing before this point may start a thread.
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ready = match enter_namespace(&cli) {
        Ok(ready) => ready,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli, ready) {
        eprintln!("❌ Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn enter_namespace(cli: &Cli) -> nsboot_core::Result<NetnsReady> {
    let keys = if cli.phase {
        EnvKeys::phase()
    } else {
        EnvKeys::default()
    };

    let mut config = NamespaceConfig::from_env_keys(&keys);
    if cli.strict {
        config = config.with_on_failure(FailurePolicy::Abort);
    }

    bootstrap(&config)
}

fn run(cli: Cli, ready: NetnsReady) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(commands::dispatch(cli.command, ready))
}
