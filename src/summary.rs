//! Header and summary output for the probe
//!
//! The summary states what each reread pass returned compared to the
//! first pass. A mismatch after rewind is an observation, not a failure.

use crate::walker::{TraceRecord, WalkReport};
use console::style;

/// Compare a reread pass with the expected tail of the first pass
pub fn describe_pass(observed: &[TraceRecord], expected: &[TraceRecord]) -> String {
    if observed.len() == expected.len()
        && observed
            .iter()
            .zip(expected)
            .all(|(o, e)| o.entry.name == e.entry.name)
    {
        return format!("{} entries, matches first pass", observed.len());
    }

    let first_diff = observed
        .iter()
        .zip(expected)
        .position(|(o, e)| o.entry.name != e.entry.name)
        .unwrap_or_else(|| observed.len().min(expected.len()));

    match observed.get(first_diff) {
        Some(record) => format!(
            "{} entries (expected {}), diverges at '{}'",
            observed.len(),
            expected.len(),
            record.entry.name
        ),
        None => format!(
            "{} entries (expected {}), ends early",
            observed.len(),
            expected.len()
        ),
    }
}

/// Print a header before the walk
pub fn print_header(path: &str, mark_after: usize) {
    println!();
    println!(
        "{} {}",
        style("dirseek-probe").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Directory:").bold(), path);
    println!("  {} {}", style("Mark after:").bold(), mark_after);
    println!();
}

/// Print what the three passes observed
pub fn print_summary(report: &WalkReport) {
    let expected = report.expected_tail();

    println!();
    println!("{}", style("Probe Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {} entries",
        style("First pass:").bold(),
        report.first_pass.len()
    );
    match report.stored {
        Some(position) => println!(
            "  {} {} (after entry {})",
            style("Stored marker:").bold(),
            position,
            report.mark_after
        ),
        None => println!(
            "  {} none (fewer than {} entries)",
            style("Stored marker:").yellow().bold(),
            report.mark_after
        ),
    }

    let seek = describe_pass(&report.seek_pass, expected);
    if report.seek_pass_consistent() {
        println!("  {} {}", style("Seek pass:").bold(), seek);
    } else {
        println!("  {} {}", style("Seek pass:").yellow().bold(), seek);
    }

    if let (Some(name), Some(seen)) = (&report.touched, report.touched_visible()) {
        let seen = if seen { "seen" } else { "not seen" };
        println!(
            "  {} {} ({} after rewind)",
            style("Touched:").bold(),
            name,
            seen
        );
    }

    let rewind = describe_pass(&report.rewind_pass, expected);
    if report.rewind_pass_consistent() {
        println!("  {} {}", style("Rewind+seek:").bold(), rewind);
    } else {
        println!("  {} {}", style("Rewind+seek:").yellow().bold(), rewind);
    }

    println!(
        "  {} {:.1}ms",
        style("Duration:").bold(),
        report.duration.as_secs_f64() * 1000.0
    );
    println!();
}
