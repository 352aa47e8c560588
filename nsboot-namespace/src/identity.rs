//! Network namespace identity
//!
//! Used to tell which namespace a thread, process, or handle refers to.

use std::fs::{self, File};
use std::os::fd::AsRawFd;
use std::path::Path;

use nsboot_core::{Error, NamespaceId, ProcessId, Result};

/// Namespace of the calling thread
///
/// # Errors
/// Returns error if `/proc/thread-self/ns/net` cannot be read
pub fn current_net_namespace() -> Result<NamespaceId> {
    read_link_id(Path::new("/proc/thread-self/ns/net"))
}

/// Namespace of the main thread of `pid`
///
/// # Errors
/// Returns error if the process does not exist or cannot be inspected
pub fn net_namespace_of(pid: ProcessId) -> Result<NamespaceId> {
    read_link_id(Path::new(&format!("/proc/{pid}/ns/net")))
}

/// Namespace referenced by any handle, bind mounts included
///
/// The handle is opened and identified through its `/proc/self/fd` link,
/// which only reads `net:[inode]` for a network namespace.
///
/// # Errors
/// Returns error if `path` cannot be opened or is not a network namespace
pub fn net_namespace_at(path: impl AsRef<Path>) -> Result<NamespaceId> {
    let path = path.as_ref();
    let handle = File::open(path).map_err(|e| Error::Namespace {
        message: format!("Failed to open {}: {e}", path.display()),
    })?;

    let fd_link = Path::new("/proc/self/fd").join(handle.as_raw_fd().to_string());
    read_link_id(&fd_link).map_err(|_| Error::Namespace {
        message: format!("{} is not a network namespace handle", path.display()),
    })
}

fn read_link_id(path: &Path) -> Result<NamespaceId> {
    let link = fs::read_link(path).map_err(|e| Error::Namespace {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    link.to_string_lossy().parse()
}
