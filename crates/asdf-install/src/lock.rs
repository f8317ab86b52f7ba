//! Advisory install locks.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InstallError, InstallResult};

/// RAII guard that holds an install lock until dropped.
///
/// The lock file stays on disk. Waiters blocked on it must see the same
/// inode the next caller opens.
#[derive(Debug)]
pub struct InstallLockGuard {
    file: std::fs::File,
    path: PathBuf,
}

impl InstallLockGuard {
    /// Path of the held lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstallLockGuard {
    fn drop(&mut self) {
        let _ = <std::fs::File as fs2::FileExt>::unlock(&self.file);
    }
}

/// Block until an exclusive lock on `lock_path` is held.
///
/// The parent directory is created if needed.
///
/// # Errors
///
/// Returns [`InstallError::Lock`] if the file cannot be created or locked.
pub fn acquire_install_lock(lock_path: &Path) -> InstallResult<InstallLockGuard> {
    use fs2::FileExt;

    let lock_err = |source| InstallError::Lock {
        path: lock_path.to_path_buf(),
        source,
    };

    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent).map_err(lock_err)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(lock_err)?;
    file.lock_exclusive().map_err(lock_err)?;

    debug!(path = %lock_path.display(), "Acquired install lock");
    Ok(InstallLockGuard {
        file,
        path: lock_path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use fs2::FileExt;

    use super::*;

    #[test]
    fn lock_is_exclusive_and_released_on_drop() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("locks").join("lua-5.4.6.lock");

        let guard = acquire_install_lock(&path).unwrap();
        assert_eq!(guard.path(), path);
        assert!(path.exists());

        let other = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        assert!(other.try_lock_exclusive().is_err());
        drop(other);

        drop(guard);
        assert!(path.exists());
        let other = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        other.try_lock_exclusive().unwrap();
    }

    #[test]
    fn waiter_and_newcomer_never_hold_the_lock_together() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Arc, mpsc};
        use std::time::Duration;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("locks").join("lua-5.4.6.lock");

        let first = acquire_install_lock(&path).unwrap();
        let second_holds = Arc::new(AtomicBool::new(false));

        let (acquired_tx, acquired_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let waiter = {
            let path = path.clone();
            let second_holds = Arc::clone(&second_holds);
            std::thread::spawn(move || {
                let guard = acquire_install_lock(&path).unwrap();
                second_holds.store(true, Ordering::SeqCst);
                acquired_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                second_holds.store(false, Ordering::SeqCst);
                drop(guard);
            })
        };

        // Give the waiter time to block on the held lock.
        std::thread::sleep(Duration::from_millis(100));
        drop(first);
        acquired_rx.recv_timeout(Duration::from_secs(10)).unwrap();

        let newcomer = {
            let path = path.clone();
            let second_holds = Arc::clone(&second_holds);
            std::thread::spawn(move || {
                let _guard = acquire_install_lock(&path).unwrap();
                assert!(
                    !second_holds.load(Ordering::SeqCst),
                    "third caller acquired the lock while the second held it"
                );
            })
        };

        std::thread::sleep(Duration::from_millis(100));
        assert!(!newcomer.is_finished());
        release_tx.send(()).unwrap();

        waiter.join().unwrap();
        newcomer.join().unwrap();
    }

    #[test]
    fn reacquire_after_release() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("x.lock");
        drop(acquire_install_lock(&path).unwrap());
        drop(acquire_install_lock(&path).unwrap());
    }
}
