//! Core type definitions with strong typing and validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Identity of a network namespace, as the kernel reports it (`net:[<inode>]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespaceId {
    inode: u64,
}

impl NamespaceId {
    /// Prefix the kernel uses for network namespace links
    pub const PREFIX: &'static str = "net:[";

    /// Create from the inode number of a namespace handle
    #[must_use]
    pub const fn from_inode(inode: u64) -> Self {
        Self { inode }
    }

    /// Get the namespace inode number
    #[must_use]
    pub const fn inode(self) -> u64 {
        self.inode
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}]", Self::PREFIX, self.inode)
    }
}

impl FromStr for NamespaceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inode = s
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| Error::Namespace {
                message: format!("not a network namespace link: {s:?}"),
            })?;

        inode
            .parse()
            .map(Self::from_inode)
            .map_err(|e| Error::Namespace {
                message: format!("invalid namespace inode in {s:?}: {e}"),
            })
    }
}

impl TryFrom<String> for NamespaceId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<NamespaceId> for String {
    fn from(id: NamespaceId) -> Self {
        id.to_string()
    }
}

/// Process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProcessId(i32);

impl ProcessId {
    /// Create from raw PID
    #[must_use]
    pub const fn from_raw(pid: i32) -> Self {
        Self(pid)
    }

    /// Get the current process ID
    #[must_use]
    pub fn current() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        Self(std::process::id() as i32)
    }

    /// Get raw PID value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<nix::unistd::Pid> for ProcessId {
    fn from(pid: nix::unistd::Pid) -> Self {
        Self(pid.as_raw())
    }
}
