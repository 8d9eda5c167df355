//! Advisory exclusive file locks.
//!
//! Only Unix-like systems provide locking. Callers should check
//! [`LOCKING_SUPPORTED`] before relying on it; elsewhere [`lock_file`]
//! returns [`FsError::Unsupported`].

use std::fs::File;

use crate::error::{FsError, FsResult};
use crate::path::{OpenMode, Path};

/// Whether [`lock_file`] can succeed on this platform.
pub const LOCKING_SUPPORTED: bool = cfg!(unix);

/// An open file holding an exclusive lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct LockedFile {
    path: Path,
    file: File,
}

impl LockedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}

/// Create (or truncate) `path` and take a non-blocking exclusive lock on it.
///
/// Fails with [`FsError::LockHeld`] when another open file description
/// already holds the lock.
pub fn lock_file(path: &Path) -> FsResult<LockedFile> {
    let file = path.open(OpenMode::NewWrite)?;
    try_lock_exclusive(path, &file)?;
    crate::debug_event!("lock", "acquired", "{path}");
    Ok(LockedFile {
        path: path.clone(),
        file,
    })
}

#[cfg(unix)]
fn try_lock_exclusive(path: &Path, file: &File) -> FsResult<()> {
    use nix::errno::Errno;
    use nix::fcntl::{FlockArg, flock};
    use std::os::unix::io::AsRawFd;

    match flock(file.as_raw_fd(), FlockArg::LockExclusiveNonblock) {
        Ok(()) => Ok(()),
        Err(Errno::EWOULDBLOCK) => Err(FsError::LockHeld {
            path: path.to_path_buf(),
        }),
        Err(errno) => Err(FsError::io(path.as_str(), errno.into())),
    }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_path: &Path, _file: &File) -> FsResult<()> {
    Err(FsError::Unsupported("file locking"))
}

impl Path {
    /// Create this file and lock it exclusively. See [`lock_file`].
    pub fn lock(&self) -> FsResult<LockedFile> {
        lock_file(self)
    }
}
