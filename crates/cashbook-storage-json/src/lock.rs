//! Cross-process write lock for the workbook.

use std::{
    fs::{File, OpenOptions, TryLockError},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use cashbook_core::WriteError;
use tracing::{debug, warn};

/// Exclusive advisory lock on a sidecar file, released on drop.
///
/// The workbook itself is replaced by rename on every write, so the lock lives on a
/// separate file whose identity never changes.
#[derive(Debug)]
pub struct WriteLock {
    file: File,
    path: PathBuf,
}

impl WriteLock {
    /// Polls for the lock every `retry` until `timeout` has elapsed.
    pub fn acquire(path: &Path, timeout: Duration, retry: Duration) -> Result<Self, WriteError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|err| {
                WriteError::new(format!("cannot open lock file {}: {err}", path.display()))
            })?;

        let started = Instant::now();
        loop {
            match file.try_lock() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    })
                }
                Err(TryLockError::WouldBlock) => {
                    if started.elapsed() >= timeout {
                        warn!(lock = %path.display(), ?timeout, "gave up waiting for write lock");
                        return Err(WriteError::new(format!(
                            "timed out after {} ms waiting for {}",
                            timeout.as_millis(),
                            path.display()
                        )));
                    }
                    debug!(lock = %path.display(), "write lock busy, retrying");
                    thread::sleep(retry);
                }
                Err(TryLockError::Error(err)) => {
                    return Err(WriteError::new(format!(
                        "cannot lock {}: {err}",
                        path.display()
                    )))
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            warn!(lock = %self.path.display(), error = %err, "failed to release write lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_holder_times_out_until_first_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json.lock");
        let short = Duration::from_millis(30);
        let retry = Duration::from_millis(5);

        let first = WriteLock::acquire(&path, short, retry).expect("first lock");
        let err = WriteLock::acquire(&path, short, retry).expect_err("lock is held");
        assert!(err.reason.contains("timed out"));

        drop(first);
        WriteLock::acquire(&path, short, retry).expect("lock released");
    }
}
