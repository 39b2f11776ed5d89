//! Directory stream probe
//!
//! Runs the fixed read / seek / rewind sequence against one directory
//! stream and records what each pass returned.
//!
//! ```text
//! opendir
//! │
//! ├── Pass 1: readdir → telldir → emit    (store marker after entry K)
//! │   pause
//! ├── Pass 2: seekdir(marker) → readdir   (entries K+1..N expected)
//! │   pause
//! ├── --touch NAME: create entry          (optional)
//! ├── Pass 3: rewinddir → seekdir(marker) (unspecified)
//! │   → readdir
//! │
//! closedir
//! ```
//!
//! If the directory yields fewer than K entries no marker is stored and
//! passes 2 and 3 rewind to the start instead of seeking.
//!
//! With `--touch` an entry is created between pass 2 and the rewind, so
//! pass 3 shows whether a rewound stream picks up the change and how the
//! old marker behaves afterwards. The entry is removed when the walk ends.

use crate::config::WalkConfig;
use crate::dir::{DirEntry, DirStream, Position};
use crate::error::{Result, WalkerError};
use crate::pause::{NoPause, Pause, Phase};
use crate::trace::TraceWriter;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One emitted entry with the marker taken right after reading it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub entry: DirEntry,
    pub position: Position,
}

/// Everything a walk observed
#[derive(Debug, Clone)]
pub struct WalkReport {
    /// Directory that was probed
    pub path: String,

    /// Entry count after which the marker was stored
    pub mark_after: usize,

    /// Pass 1: full read from open
    pub first_pass: Vec<TraceRecord>,

    /// Marker taken after the K-th emitted entry, if the pass got that far
    pub stored: Option<Position>,

    /// Pass 2: after seeking to the stored marker
    pub seek_pass: Vec<TraceRecord>,

    /// Pass 3: after rewinding and seeking to the same marker
    pub rewind_pass: Vec<TraceRecord>,

    /// Entry created before the rewind, if any
    pub touched: Option<String>,

    pub duration: Duration,
}

impl WalkReport {
    fn new(path: &str, mark_after: usize) -> Self {
        Self {
            path: path.to_string(),
            mark_after,
            first_pass: Vec::new(),
            stored: None,
            seek_pass: Vec::new(),
            rewind_pass: Vec::new(),
            touched: None,
            duration: Duration::ZERO,
        }
    }

    /// What a reread from the stored marker should return on an unchanged directory
    pub fn expected_tail(&self) -> &[TraceRecord] {
        match self.stored {
            Some(_) => &self.first_pass[self.mark_after..],
            None => &self.first_pass,
        }
    }

    /// Pass 2 returned exactly the expected tail, in order
    pub fn seek_pass_consistent(&self) -> bool {
        same_names(&self.seek_pass, self.expected_tail())
    }

    /// Pass 3 returned exactly the expected tail, in order
    pub fn rewind_pass_consistent(&self) -> bool {
        same_names(&self.rewind_pass, self.expected_tail())
    }

    /// Whether pass 3 returned the entry created before the rewind
    pub fn touched_visible(&self) -> Option<bool> {
        let name = self.touched.as_deref()?;
        Some(self.rewind_pass.iter().any(|r| r.entry.name == name))
    }
}

fn same_names(a: &[TraceRecord], b: &[TraceRecord]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.entry.name == y.entry.name)
}

/// File created for --touch, removed on drop
struct TouchedEntry {
    path: PathBuf,
}

impl TouchedEntry {
    fn create(dir: &str, name: &str) -> Result<Self> {
        let path = Path::new(dir).join(name);
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| WalkerError::Touch {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "Created entry before rewind");
        Ok(Self { path })
    }
}

impl Drop for TouchedEntry {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove touched entry");
        }
    }
}

/// Runs the probe sequence on a directory
pub struct DirectoryWalker<P = NoPause> {
    config: WalkConfig,
    pause: P,
}

impl DirectoryWalker<NoPause> {
    /// Headless walker
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            pause: NoPause,
        }
    }
}

impl<P: Pause> DirectoryWalker<P> {
    /// Walker that calls `pause` between phases
    pub fn with_pause(config: WalkConfig, pause: P) -> Self {
        Self { config, pause }
    }

    pub fn pause_strategy(&self) -> &P {
        &self.pause
    }

    /// Probe `path`, writing the trace as it goes
    ///
    /// Nothing is written if the directory cannot be opened. Once open,
    /// the stream is closed exactly once: explicitly at the end, or by
    /// drop if a stream operation fails part way.
    pub fn walk<W: Write>(&mut self, path: &str, trace: &mut TraceWriter<W>) -> Result<WalkReport> {
        let start = Instant::now();
        let mark_after = self.config.mark_after;

        let mut stream = DirStream::open(path)?;
        info!(path = stream.path(), mark_after, "Opened directory stream");

        let mut report = WalkReport::new(path, mark_after);

        // Pass 1
        trace.note(&format!("{}: {}", Phase::FirstPass, path))?;
        let mut count = 0usize;
        while let Some((entry, position)) = stream.read_with_position()? {
            if self.config.is_excluded(&entry.name) {
                debug!(name = %entry.name, "Excluded entry");
                continue;
            }
            count += 1;
            trace.entry(&entry, position)?;

            if count == mark_after {
                trace.note(&format!(
                    "storing marker {} taken after entry {} ({})",
                    position, count, entry.name
                ))?;
                report.stored = Some(position);
            }

            report.first_pass.push(TraceRecord { entry, position });
        }
        debug!(entries = count, stored = ?report.stored, "First pass complete");
        self.pause.pause(Phase::FirstPass)?;

        // Pass 2
        trace.note(&Phase::SeekReread.to_string())?;
        self.reposition(&mut stream, report.stored, trace)?;
        report.seek_pass = self.drain(&mut stream, trace)?;
        debug!(entries = report.seek_pass.len(), "Seek pass complete");
        self.pause.pause(Phase::SeekReread)?;

        // Pass 3
        trace.note(&Phase::RewindSeekReread.to_string())?;
        let _touched = match &self.config.touch {
            Some(name) => {
                let entry = TouchedEntry::create(path, name)?;
                trace.note(&format!("created {} before rewind", name))?;
                report.touched = Some(name.clone());
                Some(entry)
            }
            None => None,
        };
        trace.note("rewinding")?;
        stream.rewind()?;
        self.reposition(&mut stream, report.stored, trace)?;
        report.rewind_pass = self.drain(&mut stream, trace)?;
        debug!(entries = report.rewind_pass.len(), "Rewind pass complete");

        stream.close()?;
        trace.flush()?;

        report.duration = start.elapsed();
        info!(
            first = report.first_pass.len(),
            seek = report.seek_pass.len(),
            rewind = report.rewind_pass.len(),
            "Walk complete"
        );

        Ok(report)
    }

    /// Seek to the stored marker, or rewind when none was stored
    fn reposition<W: Write>(
        &self,
        stream: &mut DirStream,
        stored: Option<Position>,
        trace: &mut TraceWriter<W>,
    ) -> Result<()> {
        match stored {
            Some(position) => {
                trace.note(&format!("seeking to marker {}", position))?;
                stream.seek(position)?;
            }
            None => {
                trace.note(&format!(
                    "no marker stored (fewer than {} entries); rewinding to start",
                    self.config.mark_after
                ))?;
                stream.rewind()?;
            }
        }
        Ok(())
    }

    /// Read to end of stream, emitting every non-excluded entry
    fn drain<W: Write>(
        &self,
        stream: &mut DirStream,
        trace: &mut TraceWriter<W>,
    ) -> Result<Vec<TraceRecord>> {
        let mut records = Vec::new();
        while let Some((entry, position)) = stream.read_with_position()? {
            if self.config.is_excluded(&entry.name) {
                continue;
            }
            trace.entry(&entry, position)?;
            records.push(TraceRecord { entry, position });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalkerError;
    use crate::pause::RecordingPause;
    use std::fs;
    use tempfile::tempdir;

    fn names(records: &[TraceRecord]) -> Vec<String> {
        records.iter().map(|r| r.entry.name.clone()).collect()
    }

    fn fixture(count: usize) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for i in 0..count {
            fs::write(dir.path().join(format!("entry_{:03}", i)), b"").unwrap();
        }
        dir
    }

    #[test]
    fn test_marker_stored_at_kth_entry() {
        let dir = fixture(6);
        let path = dir.path().to_str().unwrap();
        let mut walker = DirectoryWalker::new(WalkConfig::for_path(path));
        let mut trace = TraceWriter::new(Vec::new());

        let report = walker.walk(path, &mut trace).unwrap();

        // 6 files plus "." and ".."
        assert_eq!(report.first_pass.len(), 8);
        assert_eq!(report.stored, Some(report.first_pass[1].position));
    }

    #[test]
    fn test_seek_pass_reproduces_tail() {
        let dir = fixture(10);
        let path = dir.path().to_str().unwrap();
        let mut config = WalkConfig::for_path(path);
        config.mark_after = 4;
        let mut walker = DirectoryWalker::new(config);
        let mut trace = TraceWriter::new(Vec::new());

        let report = walker.walk(path, &mut trace).unwrap();

        assert_eq!(names(&report.seek_pass), names(&report.first_pass[4..]));
        assert!(report.seek_pass_consistent());
    }

    #[test]
    fn test_fewer_entries_than_mark_rewinds() {
        let dir = fixture(1);
        let path = dir.path().to_str().unwrap();
        let mut config = WalkConfig::for_path(path);
        config.skip_special = true;
        let mut walker = DirectoryWalker::new(config);
        let mut trace = TraceWriter::new(Vec::new());

        let report = walker.walk(path, &mut trace).unwrap();

        assert_eq!(report.stored, None);
        assert_eq!(names(&report.first_pass), vec!["entry_000"]);
        assert_eq!(names(&report.seek_pass), vec!["entry_000"]);
        assert_eq!(names(&report.rewind_pass), vec!["entry_000"]);
        assert!(report.seek_pass_consistent());

        let text = String::from_utf8(trace.into_inner()).unwrap();
        assert!(text.contains("# no marker stored"));
    }

    #[test]
    fn test_excluded_entries_not_counted() {
        let dir = fixture(4);
        fs::write(dir.path().join("skip.tmp"), b"").unwrap();
        let path = dir.path().to_str().unwrap();

        let args = crate::config::CliArgs {
            path: path.to_string(),
            mark_after: 2,
            skip_special: true,
            exclude_patterns: vec![r"\.tmp$".to_string()],
            interactive: false,
            quiet: true,
            touch: None,
            verbose: false,
        };
        let config = WalkConfig::from_args(args).unwrap();
        let mut walker = DirectoryWalker::new(config);
        let mut trace = TraceWriter::new(Vec::new());

        let report = walker.walk(path, &mut trace).unwrap();

        let mut first = names(&report.first_pass);
        first.sort();
        assert_eq!(first, vec!["entry_000", "entry_001", "entry_002", "entry_003"]);
        assert_eq!(report.seek_pass.len(), 2);
        assert!(report
            .seek_pass
            .iter()
            .all(|r| !r.entry.is_special() && r.entry.name != "skip.tmp"));
    }

    #[test]
    fn test_pauses_between_phases() {
        let dir = fixture(3);
        let path = dir.path().to_str().unwrap();
        let mut walker =
            DirectoryWalker::with_pause(WalkConfig::for_path(path), RecordingPause::default());
        let mut trace = TraceWriter::new(Vec::new());

        walker.walk(path, &mut trace).unwrap();

        assert_eq!(
            walker.pause_strategy().phases,
            vec![Phase::FirstPass, Phase::SeekReread]
        );
    }

    #[test]
    fn test_open_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let path = missing.to_str().unwrap();
        let mut walker =
            DirectoryWalker::with_pause(WalkConfig::for_path(path), RecordingPause::default());
        let mut trace = TraceWriter::new(Vec::new());

        let err = walker.walk(path, &mut trace).unwrap_err();

        assert!(matches!(err, WalkerError::Open { .. }));
        assert_eq!(trace.lines(), 0);
        assert!(trace.into_inner().is_empty());
        assert!(walker.pause_strategy().phases.is_empty());
    }

    #[test]
    fn test_touch_visible_after_rewind_and_removed() {
        let dir = fixture(3);
        let path = dir.path().to_str().unwrap();
        let mut config = WalkConfig::for_path(path);
        config.mark_after = 100;
        config.touch = Some("late_arrival".into());
        let mut walker = DirectoryWalker::new(config);
        let mut trace = TraceWriter::new(Vec::new());

        let report = walker.walk(path, &mut trace).unwrap();

        assert_eq!(report.touched.as_deref(), Some("late_arrival"));
        assert_eq!(report.touched_visible(), Some(true));
        assert!(!names(&report.first_pass).contains(&"late_arrival".to_string()));
        assert!(!names(&report.seek_pass).contains(&"late_arrival".to_string()));
        assert!(names(&report.rewind_pass).contains(&"late_arrival".to_string()));
        assert!(!report.rewind_pass_consistent());
        assert!(!dir.path().join("late_arrival").exists());

        let text = String::from_utf8(trace.into_inner()).unwrap();
        assert!(text.contains("# created late_arrival before rewind\n# rewinding\n"));
    }

    #[test]
    fn test_touch_existing_name_fails_and_keeps_it() {
        let dir = fixture(2);
        let path = dir.path().to_str().unwrap();
        let mut config = WalkConfig::for_path(path);
        config.touch = Some("entry_000".into());
        let mut walker = DirectoryWalker::new(config);
        let mut trace = TraceWriter::new(Vec::new());

        let err = walker.walk(path, &mut trace).unwrap_err();

        assert!(matches!(err, WalkerError::Touch { .. }));
        assert!(dir.path().join("entry_000").exists());
    }

    #[test]
    fn test_expected_tail() {
        let record = |name: &str, raw: i64| TraceRecord {
            entry: DirEntry {
                name: name.into(),
                entry_type: crate::dir::EntryType::File,
                inode: raw as u64,
            },
            position: Position::from_raw(raw),
        };

        let mut report = WalkReport::new("/x", 2);
        report.first_pass = vec![record("a", 1), record("b", 2), record("c", 3)];
        report.stored = Some(Position::from_raw(2));
        report.seek_pass = vec![record("c", 3)];
        report.rewind_pass = vec![record("a", 1), record("b", 2), record("c", 3)];

        assert_eq!(names(report.expected_tail()), vec!["c"]);
        assert!(report.seek_pass_consistent());
        assert!(!report.rewind_pass_consistent());
        assert_eq!(report.touched_visible(), None);
    }
}
