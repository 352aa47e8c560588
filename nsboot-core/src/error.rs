//! Error types for nsboot

use std::path::PathBuf;

use thiserror::Error;

/// nsboot error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The namespace handle could not be opened; no join was attempted
    #[error("open: could not open network namespace {}: {source}", .path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The kernel rejected joining an existing namespace
    #[error("setns: could not join network namespace {}: {source}", .path.display())]
    Setns {
        /// Namespace handle that was opened
        path: PathBuf,
        /// Underlying errno
        #[source]
        source: nix::Error,
    },

    /// The kernel rejected creating a new namespace
    #[error("unshare: could not create network namespace: {source}")]
    Unshare {
        /// Underlying errno
        #[source]
        source: nix::Error,
    },

    /// The process already runs more than one thread
    #[error("preflight: process has {threads} threads, namespace entry needs exactly one")]
    MultiThreaded {
        /// Number of threads observed
        threads: usize,
    },

    /// Namespace inspection failed
    #[error("Namespace error: {message}")]
    Namespace {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// System error from nix
    #[error("System error: {0}")]
    System(#[from] nix::Error),
}

impl Error {
    /// Name of the failing operation, for namespace entry failures
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Open { .. } => Some("open"),
            Self::Setns { .. } => Some("setns"),
            Self::Unshare { .. } => Some("unshare"),
            Self::MultiThreaded { .. } => Some("preflight"),
            _ => None,
        }
    }

    /// Raw OS error code, if the failure came from a system call
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io(e) | Self::Open { source: e, .. } => e.raw_os_error(),
            Self::Setns { source, .. } | Self::Unshare { source } | Self::System(source) => {
                Some(*source as i32)
            }
            _ => None,
        }
    }
}

/// Result type alias for nsboot operations
pub type Result<T> = std::result::Result<T, Error>;
