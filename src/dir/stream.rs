//! Directory stream wrapper over the libc `DIR` API
//!
//! This module provides a safe Rust wrapper around opendir/readdir/
//! telldir/seekdir/rewinddir/closedir.
//!
//! Key safety considerations:
//! - A `DirStream` owns its `DIR*` exclusively (Send, NOT Sync)
//! - RAII for automatic cleanup (closedir on drop if not closed explicitly)
//! - After close the handle is null and every operation reports `Closed`
//! - Entry names are copied out before the next readdir can reuse the buffer

use crate::dir::types::{DirEntry, EntryType, Position};
use crate::error::{Result, StreamError, StreamResult, WalkerError};
use std::ffi::{CStr, CString};
use std::io;
use std::ptr;
use tracing::{debug, warn};

#[cfg(target_os = "linux")]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__errno_location()
}

#[cfg(target_os = "android")]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__errno()
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__error()
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
compile_error!("dirseek-probe supports Linux, Android, macOS and iOS only");

fn clear_errno() {
    unsafe { *errno_location() = 0 }
}

fn read_errno() -> i32 {
    unsafe { *errno_location() }
}

/// Open directory stream with tell/seek/rewind support
///
/// The stream is closed when dropped. Call [`DirStream::close`] to close it
/// explicitly and observe closedir errors.
pub struct DirStream {
    /// libc stream pointer (null once closed)
    handle: *mut libc::DIR,

    /// Path the stream was opened on
    path: String,
}

// A DIR* may move between threads but must not be used concurrently
unsafe impl Send for DirStream {}

impl DirStream {
    /// Open a directory stream
    ///
    /// This is the only input-dependent failure point of a walk: missing
    /// paths, non-directories and permission problems all surface here as
    /// [`WalkerError::Open`].
    pub fn open(path: &str) -> Result<Self> {
        let path_cstr = CString::new(path).map_err(|_| WalkerError::Open {
            path: path.into(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path contains null bytes"),
        })?;

        let handle = unsafe { libc::opendir(path_cstr.as_ptr()) };

        if handle.is_null() {
            return Err(WalkerError::Open {
                path: path.into(),
                source: io::Error::last_os_error(),
            });
        }

        debug!(path, "opendir");

        Ok(Self {
            handle,
            path: path.to_string(),
        })
    }

    fn handle(&self) -> StreamResult<*mut libc::DIR> {
        if self.handle.is_null() {
            return Err(StreamError::Closed {
                path: self.path.clone(),
            });
        }
        Ok(self.handle)
    }

    /// Read the next directory entry
    ///
    /// Returns `Ok(None)` at end of stream. errno is cleared before the
    /// call so a null return can be told apart from a read error.
    pub fn read(&mut self) -> StreamResult<Option<DirEntry>> {
        let handle = self.handle()?;

        clear_errno();
        let dirent = unsafe { libc::readdir(handle) };

        if dirent.is_null() {
            let errno = read_errno();
            if errno != 0 {
                return Err(StreamError::Read {
                    path: self.path.clone(),
                    source: io::Error::from_raw_os_error(errno),
                });
            }
            return Ok(None);
        }

        // Safety: dirent is valid until the next readdir or closedir on this stream
        Ok(Some(unsafe { Self::convert_dirent(dirent) }))
    }

    /// Get the current position of the read cursor
    ///
    /// The marker describes where the *next* read resumes, not the entry
    /// most recently returned.
    pub fn tell(&self) -> StreamResult<Position> {
        let handle = self.handle()?;

        let raw = unsafe { libc::telldir(handle) };
        if raw == -1 {
            return Err(StreamError::Tell {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }

        Ok(Position::from_raw(raw as i64))
    }

    /// Read the next entry and the position recorded right after it
    pub fn read_with_position(&mut self) -> StreamResult<Option<(DirEntry, Position)>> {
        match self.read()? {
            Some(entry) => {
                let position = self.tell()?;
                Ok(Some((entry, position)))
            }
            None => Ok(None),
        }
    }

    /// Seek to a previously recorded position
    ///
    /// seekdir has no error channel; a stale or foreign marker is accepted
    /// and the next read returns whatever the platform decides.
    pub fn seek(&mut self, position: Position) -> StreamResult<()> {
        let handle = self.handle()?;
        debug!(path = %self.path, position = position.as_raw(), "seekdir");
        unsafe { libc::seekdir(handle, position.as_raw() as libc::c_long) }
        Ok(())
    }

    /// Reset the read cursor to the beginning of the directory
    pub fn rewind(&mut self) -> StreamResult<()> {
        let handle = self.handle()?;
        debug!(path = %self.path, "rewinddir");
        unsafe { libc::rewinddir(handle) }
        Ok(())
    }

    /// Close the stream
    ///
    /// Closing an already closed stream is a no-op. The handle is released
    /// even when closedir reports an error.
    pub fn close(&mut self) -> StreamResult<()> {
        if self.handle.is_null() {
            return Ok(());
        }

        let result = unsafe { libc::closedir(self.handle) };
        self.handle = ptr::null_mut();

        if result != 0 {
            return Err(StreamError::Close {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }

        debug!(path = %self.path, "closedir");
        Ok(())
    }

    /// Check if the stream has been closed
    pub fn is_closed(&self) -> bool {
        self.handle.is_null()
    }

    /// Get the directory path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Convert a libc dirent to our DirEntry
    ///
    /// Safety: dirent must be valid
    unsafe fn convert_dirent(dirent: *const libc::dirent) -> DirEntry {
        let d = &*dirent;

        let name = CStr::from_ptr(d.d_name.as_ptr())
            .to_string_lossy()
            .into_owned();

        DirEntry {
            name,
            entry_type: EntryType::from_d_type(d.d_type),
            inode: d.d_ino as u64,
        }
    }
}

impl Drop for DirStream {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            let result = unsafe { libc::closedir(self.handle) };
            if result != 0 {
                warn!(path = %self.path, "closedir failed during drop");
            }
            self.handle = ptr::null_mut();
        }
    }
}

impl std::fmt::Debug for DirStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirStream")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}
