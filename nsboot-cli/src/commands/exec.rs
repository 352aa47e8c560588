//! Exec command implementation
//!
//! Replaces the current process image; nothing is forked. The namespace
//! variables are not passed on, so a program carrying the same hook does not
//! enter a namespace a second time.

use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;

use anyhow::{Context, Result};
use nix::unistd::execvpe;
use nsboot_namespace::NetnsReady;
use nsboot_namespace::env::{NETNS_PATH_ENV, ON_FAILURE_ENV, PHASE_ENV, SANDBOX_ENV};
use tracing::{debug, info};

/// Exit code used when the command cannot be executed
const EXEC_FAILED: i32 = 127;

/// Variables consumed by bootstrap and withheld from the new image
const CONSUMED_ENV: [&str; 4] = [SANDBOX_ENV, PHASE_ENV, NETNS_PATH_ENV, ON_FAILURE_ENV];

/// Current environment as `KEY=VALUE` strings, minus the namespace variables
fn child_environment() -> Result<Vec<CString>> {
    std::env::vars_os()
        .filter(|(key, _)| !CONSUMED_ENV.iter().any(|consumed| key == OsStr::new(consumed)))
        .map(|(key, value)| {
            let mut entry = key.as_bytes().to_vec();
            entry.push(b'=');
            entry.extend_from_slice(value.as_bytes());
            CString::new(entry).context("Invalid environment variable")
        })
        .collect()
}

pub fn execute(ready: NetnsReady, command: &[String]) -> Result<()> {
    let Some(program) = command.first() else {
        anyhow::bail!("Command cannot be empty");
    };

    let program_cstring = CString::new(program.as_bytes()).context("Invalid program name")?;
    let args_cstrings = command
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Invalid argument")?;
    let env_cstrings = child_environment()?;

    info!(status = %ready.status(), "🚀 Executing: {}", command.join(" "));
    drop(ready);

    debug!("Calling execvpe...");
    let Err(e) = execvpe(&program_cstring, &args_cstrings, &env_cstrings);

    eprintln!("❌ Failed to execute {program}: {e}");
    std::process::exit(EXEC_FAILED);
}
