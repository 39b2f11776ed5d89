//! Error types for dirseek-probe
//!
//! This module defines the error hierarchy for the probe:
//! - Directory open failures (the only input-dependent failure)
//! - Stream operation failures after a successful open
//! - Failure to create the entry requested with --touch
//! - Configuration and CLI errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Keep the OS error as the source so the cause survives `{:#}` formatting
//! - Unspecified seek behavior is never an error; it is what the probe reports

use std::io;
use thiserror::Error;

/// Top-level error type for the probe
#[derive(Error, Debug)]
pub enum WalkerError {
    /// The directory could not be opened
    #[error("Failed to open directory '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A stream operation failed after the directory was opened
    #[error("Directory stream error: {0}")]
    Stream(#[from] StreamError),

    /// The entry requested with --touch could not be created
    #[error("Failed to create '{path}' before rewind: {source}")]
    Touch {
        path: String,
        #[source]
        source: io::Error,
    },

    /// I/O errors writing the trace or pausing
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl WalkerError {
    /// Classify an open failure for display
    pub fn open_failure_kind(&self) -> Option<OpenFailureKind> {
        match self {
            WalkerError::Open { source, .. } => Some(OpenFailureKind::from_io(source)),
            _ => None,
        }
    }
}

/// Why a directory could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailureKind {
    /// Path does not exist
    NotFound,
    /// Path exists but is not a directory
    NotADirectory,
    /// Caller lacks permission to read the directory
    PermissionDenied,
    /// Anything else (EMFILE, ENOMEM, ...)
    Other,
}

impl OpenFailureKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ENOENT) => OpenFailureKind::NotFound,
            Some(libc::ENOTDIR) => OpenFailureKind::NotADirectory,
            Some(libc::EACCES) | Some(libc::EPERM) => OpenFailureKind::PermissionDenied,
            _ => OpenFailureKind::Other,
        }
    }
}

/// Failures of individual stream operations on an open directory
#[derive(Error, Debug)]
pub enum StreamError {
    /// readdir reported an error (as opposed to end of stream)
    #[error("readdir failed on '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// telldir returned -1
    #[error("telldir failed on '{path}': {source}")]
    Tell {
        path: String,
        #[source]
        source: io::Error,
    },

    /// closedir returned non-zero
    #[error("closedir failed on '{path}': {source}")]
    Close {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Operation attempted after the stream was closed
    #[error("Directory stream for '{path}' is already closed")]
    Closed { path: String },
}

impl StreamError {
    /// Returns true if this is a use-after-close error
    pub fn is_closed(&self) -> bool {
        matches!(self, StreamError::Closed { .. })
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid mark-after count
    #[error("Invalid mark-after count {count}: must be at least {min}")]
    InvalidMarkAfter { count: usize, min: usize },

    /// Invalid exclude pattern
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },

    /// Empty path argument
    #[error("Directory path must not be empty")]
    EmptyPath,

    /// --touch name is not a plain entry name
    #[error("Invalid touch name '{name}': {reason}")]
    InvalidTouchName { name: String, reason: String },
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for StreamError
pub type StreamResult<T> = std::result::Result<T, StreamError>;
