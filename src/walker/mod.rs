//! Directory stream walker
//!
//! This module implements the probe sequence: a full read that records
//! telldir markers, a seek back to the stored marker, and a rewind
//! followed by a seek to the same marker.
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │    DirectoryWalker      │
//!                     │  - WalkConfig (K, etc.) │
//!                     │  - Pause strategy       │
//!                     └───────────┬─────────────┘
//!                                 │
//!                 ┌───────────────┼───────────────┐
//!                 │               │               │
//!           ┌─────▼─────┐   ┌─────▼─────┐   ┌─────▼─────┐
//!           │ DirStream │   │TraceWriter│   │WalkReport │
//!           │  libc DIR │   │  stdout   │   │  passes   │
//!           └───────────┘   └───────────┘   └───────────┘
//! ```

pub mod probe;

pub use probe::{DirectoryWalker, TraceRecord, WalkReport};
