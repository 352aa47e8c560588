//! Process bootstrap
//!
//! [`bootstrap`] must be the first thing `main` does: before any thread,
//! timer, or async executor is started. Subsystems that rely on running in the
//! right namespace take the returned [`NetnsReady`] token, which only this
//! module can create.

use std::fmt;

use nsboot_core::{Error, Result};
use tracing::{debug, error, info};

use crate::config::{FailurePolicy, NamespaceConfig};
use crate::entry::{enter_namespace, Entered};
use crate::thread::ensure_single_threaded;

/// What bootstrap ended up doing
#[derive(Debug)]
pub enum BootstrapStatus {
    /// The hook was not activated; nothing was touched
    Inactive,
    /// The namespace change was applied
    Entered(Entered),
    /// Entry failed and the policy allowed startup to continue
    Failed(Error),
}

impl fmt::Display for BootstrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Entered(Entered::Created) => write!(f, "created new network namespace"),
            Self::Entered(Entered::Joined(path)) => {
                write!(f, "joined network namespace {}", path.display())
            }
            Self::Failed(e) => write!(f, "failed ({e})"),
        }
    }
}

/// Proof that namespace bootstrap has run
#[derive(Debug)]
pub struct NetnsReady {
    status: BootstrapStatus,
}

impl NetnsReady {
    /// Outcome of the bootstrap
    #[must_use]
    pub const fn status(&self) -> &BootstrapStatus {
        &self.status
    }

    /// True if entry was requested but did not happen
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, BootstrapStatus::Failed(_))
    }

    /// Consume the token, returning the status
    #[must_use]
    pub fn into_status(self) -> BootstrapStatus {
        self.status
    }
}

/// Run the namespace hook described by `config`
///
/// With [`FailurePolicy::LogAndContinue`] a failure is logged and reported
/// through the token; with [`FailurePolicy::Abort`] it is returned.
///
/// # Errors
/// Returns the entry error only under [`FailurePolicy::Abort`]
pub fn bootstrap(config: &NamespaceConfig) -> Result<NetnsReady> {
    if !config.active {
        debug!("Network namespace hook not activated");
        return Ok(NetnsReady {
            status: BootstrapStatus::Inactive,
        });
    }

    info!(target_ns = %config.target, "Entering network namespace");

    let attempt = if config.require_single_thread {
        ensure_single_threaded().and_then(|()| enter_namespace(&config.target))
    } else {
        enter_namespace(&config.target)
    };

    match attempt {
        Ok(entered) => {
            info!(target_ns = %config.target, "Network namespace ready");
            Ok(NetnsReady {
                status: BootstrapStatus::Entered(entered),
            })
        }
        Err(e) => {
            error!(
                operation = e.operation().unwrap_or("bootstrap"),
                errno = e.raw_os_error(),
                policy = %config.on_failure,
                error = %e,
                "Network namespace setup failed"
            );
            match config.on_failure {
                FailurePolicy::Abort => Err(e),
                FailurePolicy::LogAndContinue => Ok(NetnsReady {
                    status: BootstrapStatus::Failed(e),
                }),
            }
        }
    }
}

/// Read [`NamespaceConfig`] from the environment and run [`bootstrap`]
///
/// # Errors
/// Same as [`bootstrap`]
pub fn bootstrap_from_env() -> Result<NetnsReady> {
    bootstrap(&NamespaceConfig::from_env())
}
