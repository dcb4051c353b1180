use anyhow::Result;

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::{
    cli::args::ScanCommand,
    core::{context::ScanContext, filter::filter, writer::write_report},
};

/// Load keys, count them across the source tree and write the report.
///
/// Per-file read and decode failures end up in the summary; everything else
/// (key file, source root, output) is returned as an error.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = ScanContext::new(&cmd.args)?;
    let tally = ctx.tally()?;

    let key_count = tally.counts.len();
    let unused_count = tally.counts.unused_count();
    let report = filter(tally.counts, ctx.mode);

    write_report(&report, ctx.config.format, &ctx.destination)?;

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            key_count,
            unused_count,
            reported_count: report.len(),
            files_scanned: tally.files_scanned,
            failures: tally.failures,
            skipped_count: ctx.discovery.skipped_count,
            destination: ctx.destination,
        }),
        error_count: unused_count,
        exit_on_errors: cmd.args.deny_unused,
    })
}
