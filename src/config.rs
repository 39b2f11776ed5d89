//! Configuration types for dirseek-probe
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//! - Entry filtering (special entries and exclude patterns)

use crate::error::ConfigError;
use clap::Parser;
use regex::Regex;

/// Marker is stored after this many emitted entries unless overridden
pub const DEFAULT_MARK_AFTER: usize = 2;

/// Smallest accepted mark-after count
const MIN_MARK_AFTER: usize = 1;

/// Probe telldir/seekdir/rewinddir behavior on a directory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirseek-probe",
    version,
    about = "Probe telldir/seekdir/rewinddir behavior on a directory",
    long_about = "Reads a directory while recording telldir markers, stores the marker taken \
                  after the K-th entry, seeks back to it and rereads, then rewinds, seeks to the \
                  same marker again and rereads.\n\n\
                  Whether the marker is still meaningful after rewinddir is not specified by \
                  POSIX; the last pass reports whatever the platform returns.",
    after_help = "EXAMPLES:\n    \
        dirseek-probe /tmp\n    \
        dirseek-probe . -k 5 --skip-special\n    \
        dirseek-probe /mnt/nfs/share --exclude '^\\.nfs' -i"
)]
pub struct CliArgs {
    /// Directory to probe
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: String,

    /// Store the marker taken after this many entries
    #[arg(
        short = 'k',
        long,
        default_value_t = DEFAULT_MARK_AFTER,
        value_name = "NUM"
    )]
    pub mark_after: usize,

    /// Do not emit or count "." and ".."
    #[arg(long)]
    pub skip_special: bool,

    /// Do not emit or count entries whose name matches (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,

    /// Wait for Enter between phases
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Quiet mode - suppress header and summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Create NAME in the directory after pass 2, before rewinding (removed afterwards)
    #[arg(long, value_name = "NAME")]
    pub touch: Option<String>,

    /// Verbose output (log every stream operation)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Directory to probe
    pub path: String,

    /// Entry count (1-based) after which the marker is stored
    pub mark_after: usize,

    /// Skip "." and ".."
    pub skip_special: bool,

    /// Compiled exclude patterns
    pub exclude_patterns: Vec<Regex>,

    /// Wait for input between phases
    pub interactive: bool,

    /// Print header and summary
    pub show_summary: bool,

    /// Entry to create before the rewind
    pub touch: Option<String>,
}

impl WalkConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        if args.mark_after < MIN_MARK_AFTER {
            return Err(ConfigError::InvalidMarkAfter {
                count: args.mark_after,
                min: MIN_MARK_AFTER,
            });
        }

        let exclude_patterns = args
            .exclude_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(name) = &args.touch {
            validate_touch_name(name)?;
        }

        Ok(Self {
            path: args.path,
            mark_after: args.mark_after,
            skip_special: args.skip_special,
            exclude_patterns,
            interactive: args.interactive,
            show_summary: !args.quiet,
            touch: args.touch,
        })
    }

    /// Configuration with defaults for the given path
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mark_after: DEFAULT_MARK_AFTER,
            skip_special: false,
            exclude_patterns: Vec::new(),
            interactive: false,
            show_summary: false,
            touch: None,
        }
    }

    /// Check if an entry name is filtered out of the trace and the count
    pub fn is_excluded(&self, name: &str) -> bool {
        if self.skip_special && (name == "." || name == "..") {
            return true;
        }
        self.exclude_patterns.iter().any(|re| re.is_match(name))
    }
}

/// The touch target must be a single entry inside the probed directory
fn validate_touch_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name is a special entry"
    } else if name.contains('/') || name.contains('\0') {
        "name must not contain '/' or NUL"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidTouchName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
