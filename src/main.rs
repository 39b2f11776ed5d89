//! dirseek-probe - Directory Stream Positioning Probe
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use dirseek_probe::config::{CliArgs, WalkConfig};
use dirseek_probe::pause::{NoPause, Pause, StdinPause};
use dirseek_probe::summary::{print_header, print_summary};
use dirseek_probe::trace::TraceWriter;
use dirseek_probe::walker::DirectoryWalker;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = WalkConfig::from_args(args).context("Invalid configuration")?;

    if config.interactive {
        probe(config, StdinPause::new())
    } else {
        probe(config, NoPause)
    }
}

fn probe<P: Pause>(config: WalkConfig, pause: P) -> Result<()> {
    let path = config.path.clone();
    let show_summary = config.show_summary;

    if show_summary {
        print_header(&path, config.mark_after);
    }

    let mut walker = DirectoryWalker::with_pause(config, pause);
    let mut trace = TraceWriter::new(io::stdout().lock());

    let report = walker
        .walk(&path, &mut trace)
        .with_context(|| format!("Probe of '{}' failed", path))?;
    drop(trace);

    if show_summary {
        print_summary(&report);
    }

    if !report.rewind_pass_consistent() {
        info!("Rewind followed by seek to the stored marker did not reproduce the first pass tail");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dirseek_probe=debug,warn")
    } else {
        EnvFilter::new("dirseek_probe=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
