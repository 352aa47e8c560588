//! Single-thread preflight
//!
//! `setns(2)` and `unshare(2)` only move the calling thread. If other threads
//! are already running they stay behind in the old namespace, so entry is
//! refused unless the process is still single-threaded.

use std::fs;

use nsboot_core::{Error, Result};

const TASK_DIR: &str = "/proc/self/task";

/// Number of threads in the current process
///
/// # Errors
/// Returns error if `/proc/self/task` cannot be read
pub fn thread_count() -> Result<usize> {
    let entries = fs::read_dir(TASK_DIR).map_err(|e| Error::Namespace {
        message: format!("Failed to read {TASK_DIR}: {e}"),
    })?;

    let mut count = 0;
    for entry in entries {
        entry?;
        count += 1;
    }
    Ok(count)
}

/// Fail unless the calling thread is the only thread in the process
///
/// # Errors
/// Returns [`Error::MultiThreaded`] if other threads exist
pub fn ensure_single_threaded() -> Result<()> {
    match thread_count()? {
        1 => Ok(()),
        threads => Err(Error::MultiThreaded { threads }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_thread_count_at_least_one() {
        assert!(thread_count().unwrap() >= 1);
    }

    #[test]
    fn test_extra_thread_is_detected() {
        let (started_tx, started_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            started_tx.send(()).unwrap();
            let _ = stop_rx.recv();
        });
        started_rx.recv().unwrap();

        let count = thread_count().unwrap();
        let result = ensure_single_threaded();

        stop_tx.send(()).unwrap();
        handle.join().unwrap();

        assert!(count >= 2);
        match result {
            Err(Error::MultiThreaded { threads }) => assert!(threads >= 2),
            other => panic!("expected MultiThreaded, got {other:?}"),
        }
    }
}
