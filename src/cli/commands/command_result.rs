use crate::core::{aggregator::FileFailure, writer::Destination};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    /// Number of known keys.
    pub key_count: usize,
    /// Keys never found in any scanned file.
    pub unused_count: usize,
    /// Keys written to the report (all keys, or only unused ones).
    pub reported_count: usize,
    /// Source files whose counts were merged.
    pub files_scanned: usize,
    /// Source files that could not be read or decoded.
    pub failures: Vec<FileFailure>,
    /// Paths skipped during discovery due to access errors.
    pub skipped_count: usize,
    pub destination: Destination,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running keytally commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}
