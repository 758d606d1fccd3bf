//! Atomic I/O operations with file locking

use crate::{Error, NormalizedPath, Result, checksum};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// The temp file lives next to the target (same filesystem) and is removed
/// if any step before the rename fails. Permissions of an existing target
/// are carried over.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let written = write_temp(&temp_path, &native_path, content);
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Ok(meta) = fs::metadata(&native_path) {
        let _ = fs::set_permissions(&temp_path, meta.permissions());
    }

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    Ok(())
}

fn write_temp(temp_path: &Path, native_path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;

    Ok(())
}

/// Read UTF-8 text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| map_read_error(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

fn map_read_error(path: &Path, e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::InvalidData {
        Error::InvalidEncoding {
            path: path.to_path_buf(),
        }
    } else {
        Error::io(path, e)
    }
}

/// An existing file held under an exclusive advisory lock.
///
/// The lock is taken on open and released when the guard is dropped, so every
/// exit path (including early returns on error) gives it back.
#[derive(Debug)]
pub struct LockedFile {
    path: NormalizedPath,
    file: File,
}

impl LockedFile {
    /// Open an existing file and lock it exclusively.
    ///
    /// Fails with [`Error::LockFailed`] if another process holds the lock.
    pub fn open(path: &NormalizedPath) -> Result<Self> {
        let native_path = path.to_native();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&native_path)
            .map_err(|e| Error::io(&native_path, e))?;

        file.try_lock_exclusive()
            .map_err(|_| Error::LockFailed { path: native_path })?;

        tracing::debug!(path = %path, "acquired exclusive lock");
        Ok(Self {
            path: path.clone(),
            file,
        })
    }

    /// Read the whole file as UTF-8 through the locked handle.
    pub fn read_text(&self) -> Result<String> {
        let native_path = self.path.to_native();
        let mut handle = &self.file;
        handle
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io(&native_path, e))?;
        let mut content = String::new();
        handle
            .read_to_string(&mut content)
            .map_err(|e| map_read_error(&native_path, e))?;
        Ok(content)
    }

    /// Atomically replace the file's content.
    ///
    /// `expected_checksum` is the checksum of the content this caller read.
    /// If the file no longer matches it, nothing is written and
    /// [`Error::ConcurrentModification`] is returned.
    pub fn replace(self, content: &str, expected_checksum: &str) -> Result<()> {
        let actual = checksum::compute_content_checksum(&self.read_text()?);
        if actual != expected_checksum {
            return Err(Error::ConcurrentModification {
                path: self.path.to_native(),
                expected: expected_checksum.to_string(),
                actual,
            });
        }

        write_text(&self.path, content)?;
        tracing::info!(path = %self.path, "replaced file content");
        Ok(())
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if FileExt::unlock(&self.file).is_ok() {
            tracing::debug!(path = %self.path, "released lock");
        }
    }
}
