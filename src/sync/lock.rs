//! Mutual exclusion for sync runs.
//!
//! A lock file under the configured local folder guards the whole
//! reconciliation unit: overlapping runs would race on folder creation,
//! so the second invocation fails fast instead.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the lock file inside the local folder.
const LOCK_FILE: &str = ".jm.lock";

/// Held for the duration of one sync run; released on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Acquire the run lock for `local_folder`, creating the folder if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `SyncInProgress` if another run holds the lock, or an IO
    /// error if the folder or lock file cannot be created.
    pub fn acquire(local_folder: &Path) -> Result<Self> {
        fs::create_dir_all(local_folder)?;
        let path = local_folder.join(LOCK_FILE);

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(Error::SyncInProgress { lock: path })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Path of the held lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let temp = TempDir::new().unwrap();
        let _held = RunLock::acquire(temp.path()).unwrap();

        match RunLock::acquire(temp.path()) {
            Err(Error::SyncInProgress { lock }) => {
                assert_eq!(lock, temp.path().join(LOCK_FILE));
            }
            other => panic!("expected SyncInProgress, got {other:?}"),
        }
    }

    #[test]
    fn test_lock_released_on_drop() {
        let temp = TempDir::new().unwrap();
        {
            let _held = RunLock::acquire(temp.path()).unwrap();
            assert!(temp.path().join(LOCK_FILE).exists());
        }
        assert!(!temp.path().join(LOCK_FILE).exists());
        assert!(RunLock::acquire(temp.path()).is_ok());
    }

    #[test]
    fn test_acquire_creates_missing_folder() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("projects");
        let lock = RunLock::acquire(&folder).unwrap();
        assert!(folder.is_dir());
        assert!(lock.path().exists());
    }
}
