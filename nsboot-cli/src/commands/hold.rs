//! Hold command implementation

use anyhow::{Context, Result};
use nsboot_core::ProcessId;
use nsboot_namespace::{current_net_namespace, NetnsReady};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

pub async fn execute(ready: &NetnsReady) -> Result<()> {
    if ready.is_degraded() {
        warn!(status = %ready.status(), "Holding without the requested network namespace");
    }

    let ns = current_net_namespace().context("Failed to read network namespace")?;
    info!("⏸️  Holding {} as PID {}. Press Ctrl+C to stop...", ns, ProcessId::current());

    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res.context("Failed to listen for Ctrl+C")?,
        _ = terminate.recv() => {}
    }

    info!("🛑 Releasing network namespace");
    Ok(())
}
