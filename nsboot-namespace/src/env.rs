//! Environment encoding of [`NamespaceConfig`]
//!
//! The launcher describes the wanted namespace to the child through
//! environment variables; the child decodes them exactly once, before any
//! other initialization.

use std::ffi::OsString;
use std::process::Command;

use tracing::warn;

use crate::config::{FailurePolicy, NamespaceConfig, NamespaceTarget};
use crate::gate::ActivationFlag;

/// Activation flag set by the shim launcher
pub const SANDBOX_ENV: &str = "_RUNWASI_SANDBOX";

/// Activation flag set by the runwasi init phase
pub const PHASE_ENV: &str = "_RUNWASI_PHASE";

/// Path of the network namespace handle to join
pub const NETNS_PATH_ENV: &str = "_RUNWASI_NETNS_PATH";

/// Failure policy (`abort` or `continue`)
pub const ON_FAILURE_ENV: &str = "_RUNWASI_NETNS_ON_FAILURE";

/// Names of the variables that carry a [`NamespaceConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvKeys {
    /// Activation flag
    pub activation: String,
    /// Namespace path
    pub path: String,
    /// Failure policy
    pub on_failure: String,
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self {
            activation: SANDBOX_ENV.to_string(),
            path: NETNS_PATH_ENV.to_string(),
            on_failure: ON_FAILURE_ENV.to_string(),
        }
    }
}

impl EnvKeys {
    /// Keys used by the runwasi init phase
    #[must_use]
    pub fn phase() -> Self {
        Self {
            activation: PHASE_ENV.to_string(),
            ..Self::default()
        }
    }

    /// Every variable name in this set
    #[must_use]
    pub fn names(&self) -> [&str; 3] {
        [&self.activation, &self.path, &self.on_failure]
    }
}

impl NamespaceConfig {
    /// Read the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_keys(&EnvKeys::default())
    }

    /// Read the configuration from the process environment using `keys`
    #[must_use]
    pub fn from_env_keys(keys: &EnvKeys) -> Self {
        Self::from_lookup(keys, |key| std::env::var_os(key))
    }

    /// Decode the configuration through `lookup`
    ///
    /// The path and policy variables are only consulted when the activation
    /// flag is set.
    pub fn from_lookup<F>(keys: &EnvKeys, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let flag = ActivationFlag::from_value(lookup(&keys.activation).as_deref());
        if !flag.is_active() {
            return Self::new();
        }

        let target = NamespaceTarget::from_path_value(lookup(&keys.path).as_deref());

        let on_failure = lookup(&keys.on_failure).map_or_else(FailurePolicy::default, |raw| {
            raw.to_string_lossy().parse().unwrap_or_else(|e| {
                warn!(
                    variable = %keys.on_failure,
                    error = %e,
                    "Ignoring invalid failure policy"
                );
                FailurePolicy::default()
            })
        });

        Self::new()
            .with_active(true)
            .with_target(target)
            .with_on_failure(on_failure)
    }

    /// Variables that reproduce this configuration in a child process
    ///
    /// An inactive configuration yields nothing, leaving the child inert.
    #[must_use]
    pub fn env_vars(&self, keys: &EnvKeys) -> Vec<(String, OsString)> {
        if !self.active {
            return Vec::new();
        }

        let path = self
            .target
            .path()
            .map_or_else(OsString::new, |p| p.as_os_str().to_os_string());

        let mut vars = vec![
            (keys.activation.clone(), OsString::from("1")),
            (keys.path.clone(), path),
        ];
        if self.on_failure != FailurePolicy::default() {
            vars.push((keys.on_failure.clone(), OsString::from(self.on_failure.as_str())));
        }
        vars
    }

    /// Configure `command` so the spawned child enters this namespace on start
    ///
    /// Values the launcher itself inherited under `keys` are removed first, so
    /// the child only sees what [`NamespaceConfig::env_vars`] produces.
    pub fn apply_to_command<'a>(&self, keys: &EnvKeys, command: &'a mut Command) -> &'a mut Command {
        for key in keys.names() {
            command.env_remove(key);
        }
        command.envs(self.env_vars(keys))
    }
}
