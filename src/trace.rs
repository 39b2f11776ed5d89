//! Line-oriented walk trace
//!
//! Entry lines are `<name>\t<marker>\t<type>\t<inode>`; narration lines
//! start with `# ` so scripts can filter them out.

use crate::dir::{DirEntry, Position};
use std::io::{self, Write};

/// Writes the human-readable trace of a walk
pub struct TraceWriter<W> {
    out: W,
    lines: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// One line per emitted entry: name and the marker taken after it
    pub fn entry(&mut self, entry: &DirEntry, position: Position) -> io::Result<()> {
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}",
            entry.name,
            position,
            entry.entry_type.tag(),
            entry.inode
        )?;
        self.lines += 1;
        Ok(())
    }

    /// Phase transition narration
    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "# {}", message)?;
        self.lines += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
