//! Launcher-side demonstration
//!
//! Spawns a child with the variables that make its namespace hook join (or
//! create) a network namespace on start.
//!
//! Run with: cargo run --example launch_child -- /var/run/netns/blue

use std::process::Command;

use nsboot_namespace::{EnvKeys, NamespaceConfig};

fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).unwrap_or_default();
    let config = NamespaceConfig::join(path);

    println!("🔧 Child configuration: {config:?}");

    let mut child = Command::new("/bin/sh");
    child.arg("-c").arg("env | grep _RUNWASI_ || true");
    config.apply_to_command(&EnvKeys::default(), &mut child);

    match child.status() {
        Ok(status) => println!("👋 Child exited with {status}"),
        Err(e) => eprintln!("❌ Failed to spawn child: {e}"),
    }
}
