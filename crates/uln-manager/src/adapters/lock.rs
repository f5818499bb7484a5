//! # Data Directory Lock
//!
//! Exclusive `fs2` lock on the data directory, so one process owns the store.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from data directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),
    /// Another process holds the lock.
    #[error("Data directory already in use ({})", .path.display())]
    AlreadyLocked {
        /// Lock file path.
        path: PathBuf,
    },
    /// Failed to write PID to lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Exclusive lock on a data directory, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
}

impl DataDirLock {
    /// Lock file name.
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock without waiting.
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        std::fs::create_dir_all(data_dir).map_err(LockError::CreateFailed)?;
        let path = data_dir.join(Self::LOCK_FILE);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked { path });
        }

        file.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(file, "{}", std::process::id()).map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;

        info!("[uln] acquired data directory lock {}", path.display());
        Ok(Self { file, path })
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
