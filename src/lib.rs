//! dirseek-probe - Directory Stream Positioning Probe
//!
//! A diagnostic for the parts of the POSIX directory stream API whose
//! behavior is platform-specific or left unspecified: what `seekdir` does
//! with a marker from `telldir`, and whether that marker still means
//! anything after `rewinddir`.
//!
//! # What it does
//!
//! 1. Reads the whole directory, printing each entry with the `telldir`
//!    marker taken right after it, and stores the marker after entry K.
//! 2. Seeks to the stored marker and reads to the end. On an unchanged
//!    directory this yields entries K+1..N.
//! 3. Rewinds, seeks to the same marker and reads to the end. The result
//!    is whatever the platform returns. With `--touch NAME` an entry is
//!    created just before the rewind and removed after the walk.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │              DirectoryWalker               │
//! │  pass 1 ─ pause ─ pass 2 ─ pause ─ pass 3  │
//! └──────────────────────┬─────────────────────┘
//!                        │
//!                        ▼
//! ┌────────────────────────────────────────────┐
//! │   DirStream (opendir ... closedir, RAII)   │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Probe the current directory with the default K=2
//! dirseek-probe
//!
//! # Store the marker after the 5th real entry, waiting between phases
//! dirseek-probe /mnt/share -k 5 --skip-special -i
//! ```

pub mod config;
pub mod dir;
pub mod error;
pub mod pause;
pub mod summary;
pub mod trace;
pub mod walker;

pub use config::{CliArgs, WalkConfig};
pub use error::{Result, WalkerError};
pub use walker::{DirectoryWalker, WalkReport};
