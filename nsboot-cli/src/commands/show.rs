//! Show command implementation

use anyhow::{Context, Result};
use nsboot_core::{NamespaceId, ProcessId};
use nsboot_namespace::{net_namespace_of, NetnsReady};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ShowReport {
    pid: ProcessId,
    net_namespace: NamespaceId,
    init_namespace: Option<NamespaceId>,
    bootstrap: String,
    degraded: bool,
}

impl ShowReport {
    fn is_isolated(&self) -> Option<bool> {
        self.init_namespace.map(|init| init != self.net_namespace)
    }
}

pub fn execute(ready: &NetnsReady, pid: Option<i32>, json: bool) -> Result<()> {
    let pid = pid.map_or_else(ProcessId::current, ProcessId::from_raw);

    let net_namespace =
        net_namespace_of(pid).context("Failed to get network namespace information")?;

    let report = ShowReport {
        pid,
        net_namespace,
        // Reading PID 1's namespace needs privileges we may not have.
        init_namespace: net_namespace_of(ProcessId::from_raw(1)).ok(),
        bootstrap: ready.status().to_string(),
        degraded: ready.is_degraded(),
    };

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{out}");
        return Ok(());
    }

    println!("\n🔒 Network namespace for PID {}", report.pid);
    println!("{:-<60}", "");
    println!("  NET:       {}", report.net_namespace);
    println!("  Bootstrap: {}", report.bootstrap);

    match report.is_isolated() {
        Some(true) => println!("\n✅ Process is in an isolated network namespace"),
        Some(false) => println!("\n⚠️  Process is in the host network namespace"),
        None => println!("\n❔ Host network namespace not readable"),
    }

    Ok(())
}
