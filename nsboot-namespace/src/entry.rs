//! Network namespace entry
//!
//! Moves the calling thread into a new or an existing network namespace.
//! Must run while the process is still single-threaded; see
//! [`crate::thread`].

use std::fs::File;
use std::path::{Path, PathBuf};

use nix::sched::{setns, unshare, CloneFlags};
use nsboot_core::{Error, Result};
use serde::Serialize;
use tracing::debug;

use crate::config::NamespaceTarget;

/// What a successful entry did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entered {
    /// A fresh network namespace was created
    Created,
    /// The namespace behind this handle was joined
    Joined(PathBuf),
}

/// Result of a namespace entry attempt
pub type NamespaceOutcome = Result<Entered>;

/// Apply `target` to the calling thread
///
/// Either the namespace change is fully applied or nothing changes. Failures
/// are reported once, without retry.
///
/// # Errors
/// - [`Error::Open`] if the handle cannot be opened (no join is attempted)
/// - [`Error::Setns`] if the kernel refuses the join
/// - [`Error::Unshare`] if the kernel refuses to create a namespace
pub fn enter_namespace(target: &NamespaceTarget) -> NamespaceOutcome {
    match target.path() {
        None => create_new(),
        Some(path) => join_existing(path),
    }
}

fn create_new() -> NamespaceOutcome {
    debug!("Unsharing into a new network namespace");

    unshare(CloneFlags::CLONE_NEWNET).map_err(|source| Error::Unshare { source })?;

    Ok(Entered::Created)
}

fn join_existing(path: &Path) -> NamespaceOutcome {
    debug!(path = %path.display(), "Joining network namespace");

    // std opens with O_CLOEXEC; the handle is closed when `ns` drops.
    let ns = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    setns(&ns, CloneFlags::CLONE_NEWNET).map_err(|source| Error::Setns {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Entered::Joined(path.to_path_buf()))
}
