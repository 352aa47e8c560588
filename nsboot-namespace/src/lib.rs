//! Early-startup network namespace entry
//!
//! Places the process in a Linux network namespace before anything else runs:
//! - `gate` - decides from the environment whether to act at all
//! - `entry` - unshares a new namespace or joins an existing handle
//! - `thread` - refuses to act once other threads exist
//! - `bootstrap` - ties it together under a failure policy
//!
//! The namespace syscalls only affect the calling thread, so
//! [`bootstrap()`] has to run as the first statement of `main`, before any
//! thread pool or async runtime is started.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod bootstrap;
pub mod config;
pub mod entry;
pub mod env;
pub mod gate;
pub mod identity;
pub mod thread;

pub use bootstrap::{bootstrap, bootstrap_from_env, BootstrapStatus, NetnsReady};
pub use config::{FailurePolicy, NamespaceConfig, NamespaceTarget};
pub use entry::{enter_namespace, Entered, NamespaceOutcome};
pub use env::EnvKeys;
pub use gate::{should_activate, ActivationFlag};
pub use identity::{current_net_namespace, net_namespace_at, net_namespace_of};
pub use thread::{ensure_single_threaded, thread_count};
