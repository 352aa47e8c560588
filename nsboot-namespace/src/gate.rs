//! Activation gate
//!
//! Decides from a single environment value whether namespace setup runs at
//! all. Only the exact value `1` activates; anything else is inert.

use std::ffi::{OsStr, OsString};

/// Raw state of the activation variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationFlag {
    /// Variable not set
    Absent,
    /// Variable set to something other than `1`
    Inactive(String),
    /// Variable set to exactly `1`
    Active,
}

impl ActivationFlag {
    /// Classify the value of the activation variable
    #[must_use]
    pub fn from_value(value: Option<&OsStr>) -> Self {
        match value {
            None => Self::Absent,
            Some(v) if v.as_encoded_bytes() == b"1" => Self::Active,
            Some(v) => Self::Inactive(v.to_string_lossy().into_owned()),
        }
    }

    /// Whether namespace setup should run
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Returns true iff the activation value is present and exactly `1`
#[must_use]
pub fn should_activate(value: Option<&OsStr>) -> bool {
    ActivationFlag::from_value(value).is_active()
}

/// Like [`should_activate`], reading `key` through `lookup`
pub fn should_activate_with<F>(lookup: F, key: &str) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    should_activate(lookup(key).as_deref())
}
