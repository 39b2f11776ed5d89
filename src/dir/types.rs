//! Directory entry types and stream position markers
//!
//! These types are owned copies of what the platform hands back from
//! `readdir`/`telldir`, so they stay valid after the stream advances.

use std::fmt;

/// Type of filesystem entry, as reported by `d_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntryType {
    /// Regular file
    File = 0,
    /// Directory
    Directory = 1,
    /// Symbolic link
    Symlink = 2,
    /// Block device
    BlockDevice = 3,
    /// Character device
    CharDevice = 4,
    /// Named pipe (FIFO)
    Fifo = 5,
    /// Unix socket
    Socket = 6,
    /// Filesystem did not report a type (DT_UNKNOWN)
    Unknown = 255,
}

impl EntryType {
    /// Convert from a `dirent::d_type` value
    pub fn from_d_type(d_type: u8) -> Self {
        match d_type {
            libc::DT_REG => EntryType::File,
            libc::DT_DIR => EntryType::Directory,
            libc::DT_LNK => EntryType::Symlink,
            libc::DT_BLK => EntryType::BlockDevice,
            libc::DT_CHR => EntryType::CharDevice,
            libc::DT_FIFO => EntryType::Fifo,
            libc::DT_SOCK => EntryType::Socket,
            _ => EntryType::Unknown,
        }
    }

    /// Single-character tag used in the trace
    pub fn tag(&self) -> char {
        match self {
            EntryType::File => 'f',
            EntryType::Directory => 'd',
            EntryType::Symlink => 'l',
            EntryType::BlockDevice => 'b',
            EntryType::CharDevice => 'c',
            EntryType::Fifo => 'p',
            EntryType::Socket => 's',
            EntryType::Unknown => '?',
        }
    }
}

/// One entry read from a directory stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (lossy UTF-8)
    pub name: String,

    /// Entry type from d_type
    pub entry_type: EntryType,

    /// Inode number from d_ino
    pub inode: u64,
}

impl DirEntry {
    /// Check if this is "." or ".."
    pub fn is_special(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Opaque `telldir` marker
///
/// Only meaningful for the stream instance that produced it. The numeric
/// value is exposed for display; on Linux it is a cookie, elsewhere it
/// may be an index into a per-stream table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(i64);

impl Position {
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
