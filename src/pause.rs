//! Pacing between walk phases
//!
//! The walk calls a [`Pause`] strategy between phases so a human can read
//! the trace before the next phase starts. Tests and scripted runs use
//! [`NoPause`].

use std::fmt;
use std::io::{self, BufRead, Write};

/// Walk phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Read to end, recording markers
    FirstPass,
    /// Seek to the stored marker and read to end
    SeekReread,
    /// Rewind, seek to the stored marker again and read to end
    RewindSeekReread,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::FirstPass => "first pass",
            Phase::SeekReread => "seek and reread",
            Phase::RewindSeekReread => "rewind, seek and reread",
        };
        f.write_str(name)
    }
}

/// Strategy invoked between phases with the phase that just finished
pub trait Pause {
    fn pause(&mut self, finished: Phase) -> io::Result<()>;
}

/// Headless strategy: returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

impl Pause for NoPause {
    fn pause(&mut self, _finished: Phase) -> io::Result<()> {
        Ok(())
    }
}

/// Interactive strategy: prompt on stderr and block until a line is read
pub struct StdinPause<R> {
    input: R,
}

impl StdinPause<io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdinPause<io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinPause<R> {
    /// Build from any line source
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Pause for StdinPause<R> {
    fn pause(&mut self, finished: Phase) -> io::Result<()> {
        let mut stderr = io::stderr();
        write!(stderr, "-- {} done, press Enter to continue --", finished)?;
        stderr.flush()?;

        // EOF counts as "continue"
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

/// Records every pause call
#[derive(Debug, Default, Clone)]
pub struct RecordingPause {
    pub phases: Vec<Phase>,
}

impl Pause for RecordingPause {
    fn pause(&mut self, finished: Phase) -> io::Result<()> {
        self.phases.push(finished);
        Ok(())
    }
}
