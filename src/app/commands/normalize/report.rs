//! Plain-text summary written at the end of a normalize run.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::domain::OperationLedger;

/// `apostrophe_standardization_summary_<YYYYMMDD_HHMMSS>.txt`
pub fn summary_file_name(started: &DateTime<Local>) -> String {
    format!("apostrophe_standardization_summary_{}.txt", started.format("%Y%m%d_%H%M%S"))
}

pub fn render_summary(
    ledger: &OperationLedger,
    base_dir: &Path,
    simulate: bool,
    now: &DateTime<Local>,
) -> String {
    let mut out = String::new();
    out.push_str("APOSTROPHE STANDARDIZATION SUMMARY\n");
    out.push_str("=================================\n\n");
    let _ = writeln!(out, "Date: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Base Directory: {}", base_dir.display());
    let _ = writeln!(out, "Dry Run: {}\n", if simulate { "True" } else { "False" });

    let _ = writeln!(out, "Total Directories Processed: {}", ledger.total());
    let _ = writeln!(out, "Directories Renamed: {}", ledger.renamed().len());
    let _ = writeln!(out, "Directories Skipped: {}", ledger.skipped().len());
    let _ = writeln!(out, "Errors Encountered: {}\n", ledger.errored().len());

    out.push_str("RENAMED DIRECTORIES\n------------------\n");
    for entry in ledger.renamed() {
        let _ = writeln!(out, "  {} -> {}", entry.from.display(), entry.to.display());
    }

    out.push_str("\nSKIPPED DIRECTORIES\n------------------\n");
    for path in ledger.skipped() {
        let _ = writeln!(out, "  {}", path.display());
    }

    out.push_str("\nERRORS\n------\n");
    for entry in ledger.errored() {
        let _ = writeln!(out, "  {}: {}", entry.path.display(), entry.error);
    }

    if !ledger.restore_warnings().is_empty() {
        out.push_str("\nMETADATA WARNINGS\n-----------------\n");
        for entry in ledger.restore_warnings() {
            let _ = writeln!(out, "  {}: {}", entry.path.display(), entry.error);
        }
    }
    out
}
