//! Directory stream access
//!
//! This module wraps the POSIX directory stream API so the walker can
//! read, tell, seek and rewind on a single owned handle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     DirStream                       │
//! │  - One per walk (Send, not Sync)                    │
//! │  - RAII cleanup (closedir on drop)                  │
//! │  - Fallible read/tell/close, Closed after close     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  libc (C FFI)                       │
//! │  opendir / readdir / telldir / seekdir /            │
//! │  rewinddir / closedir                               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dirseek_probe::dir::DirStream;
//!
//! let mut stream = DirStream::open("/tmp").unwrap();
//! let mut marker = None;
//! while let Some((entry, position)) = stream.read_with_position().unwrap() {
//!     println!("{} {}", entry.name, position);
//!     marker.get_or_insert(position);
//! }
//! if let Some(position) = marker {
//!     stream.seek(position).unwrap();
//! }
//! stream.close().unwrap();
//! ```

mod stream;
pub mod types;

pub use stream::DirStream;
pub use types::{DirEntry, EntryType, Position};
