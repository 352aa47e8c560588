//! Namespace configuration

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use nsboot_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which network namespace the process should end up in
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceTarget {
    /// Unshare into a fresh namespace (only loopback present)
    #[default]
    CreateNew,
    /// Join the namespace referenced by this handle
    Join(PathBuf),
}

impl NamespaceTarget {
    /// Decode the namespace path variable: unset or empty means create new
    #[must_use]
    pub fn from_path_value(value: Option<&OsStr>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::Join(PathBuf::from(path)),
            _ => Self::CreateNew,
        }
    }

    /// Join an existing namespace handle
    ///
    /// # Errors
    /// Returns error if `path` is empty
    pub fn join(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig {
                message: "namespace path cannot be empty; use CreateNew instead".to_string(),
            });
        }
        Ok(Self::Join(path))
    }

    /// Path to join, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateNew => None,
            Self::Join(path) if path.as_os_str().is_empty() => None,
            Self::Join(path) => Some(path.as_path()),
        }
    }
}

impl fmt::Display for NamespaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            None => write!(f, "new network namespace"),
            Some(path) => write!(f, "network namespace {}", path.display()),
        }
    }
}

/// What bootstrap does when namespace entry fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log a diagnostic and let startup continue
    #[default]
    LogAndContinue,
    /// Hand the error back so the caller can exit
    Abort,
}

impl FailurePolicy {
    /// Policy name as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogAndContinue => "continue",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" | "log-and-continue" => Ok(Self::LogAndContinue),
            other => Err(Error::InvalidConfig {
                message: format!("unknown failure policy {other:?} (expected abort or continue)"),
            }),
        }
    }
}

/// Network namespace bootstrap configuration
///
/// Built once at process start, normally with [`NamespaceConfig::from_env`],
/// and handed to [`crate::bootstrap()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Run namespace setup at all
    pub active: bool,

    /// Namespace to create or join
    pub target: NamespaceTarget,

    /// Behavior on failure
    pub on_failure: FailurePolicy,

    /// Refuse to touch namespaces when other threads already exist
    pub require_single_thread: bool,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            active: false,
            target: NamespaceTarget::CreateNew,
            on_failure: FailurePolicy::LogAndContinue,
            require_single_thread: true,
        }
    }
}

impl NamespaceConfig {
    /// Create an inactive configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active configuration that unshares into a new namespace
    #[must_use]
    pub fn create_new() -> Self {
        Self::new().with_active(true)
    }

    /// Active configuration that joins `path` (empty means create new)
    #[must_use]
    pub fn join(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new()
            .with_active(true)
            .with_target(NamespaceTarget::from_path_value(Some(path.as_os_str())))
    }

    /// Enable or disable the hook
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the namespace target
    #[must_use]
    pub fn with_target(mut self, target: NamespaceTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_on_failure(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    /// Enable or disable the single-thread preflight
    #[must_use]
    pub fn with_require_single_thread(mut self, require: bool) -> Self {
        self.require_single_thread = require;
        self
    }
}
