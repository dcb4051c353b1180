//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow keytally to be used as a library.
//! The key report itself is produced by `core::writer`; this module only
//! prints the human-readable summary around it.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{aggregator::FileFailure, writer::Destination};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Scan(summary) => {
            let fail_on_unused = result.exit_on_errors;
            // Keep stdout clean when the report itself goes there.
            if summary.destination == Destination::Stdout {
                print_scan_to(summary, fail_on_unused, verbose, &mut io::stderr().lock());
            } else {
                print_scan_to(summary, fail_on_unused, verbose, &mut io::stdout().lock());
            }
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print a scan summary to a custom writer.
pub fn print_scan_to<W: Write>(
    summary: &ScanSummary,
    fail_on_unused: bool,
    verbose: bool,
    writer: &mut W,
) {
    let counts = format!(
        "Scanned {} source {} for {} {}: {} unused",
        summary.files_scanned,
        plural(summary.files_scanned, "file", "files"),
        summary.key_count,
        plural(summary.key_count, "key", "keys"),
        summary.unused_count,
    );
    let line = if fail_on_unused && summary.unused_count > 0 {
        format!("{} {}", FAILURE_MARK.red(), counts.red())
    } else {
        format!("{} {}", SUCCESS_MARK.green(), counts.green())
    };
    let _ = writeln!(writer, "{}", line);

    let _ = writeln!(
        writer,
        "  {} wrote {} {} to {}",
        "-->".blue(),
        summary.reported_count,
        plural(summary.reported_count, "key", "keys"),
        summary.destination
    );

    print_failures_to(&summary.failures, verbose, writer);

    if summary.skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped due to access errors",
            "warning:".bold().yellow(),
            summary.skipped_count
        );
    }
}

/// Print per-file failures: a count, or one line per file when verbose.
pub fn print_failures_to<W: Write>(failures: &[FileFailure], verbose: bool, writer: &mut W) {
    if failures.is_empty() {
        return;
    }

    if verbose {
        let mut sorted: Vec<&FileFailure> = failures.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));
        for failure in sorted {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "warning:".bold().yellow(),
                failure.path.display(),
                failure.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            failures.len(),
            "-v".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
