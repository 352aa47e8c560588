//! nsboot Core - error taxonomy and shared value types
//!
//! This crate provides the types used by the namespace bootstrap and the CLI.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{NamespaceId, ProcessId};
