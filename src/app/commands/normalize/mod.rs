//! `folio normalize`: replace plain apostrophes with typographic ones in directory names.

mod discovery;
mod rename;
mod report;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::AppContext;
use crate::domain::{AppError, OperationLedger};
use crate::ports::{DirectoryTree, RunLog};

pub use discovery::{Discovery, depth, discover, order_deepest_first};
pub use rename::RenameRun;
pub use report::{render_summary, summary_file_name};
pub use validation::{Validation, validate};

const RULE: &str =
    "================================================================================";

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub base_dir: PathBuf,
    pub simulate: bool,
    /// Where the summary report is written.
    pub report_dir: PathBuf,
}

#[derive(Debug)]
pub struct NormalizeOutcome {
    pub ledger: OperationLedger,
    pub validation: Validation,
    pub summary_path: PathBuf,
}

impl NormalizeOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.validation.passed() { 0 } else { 1 }
    }
}

pub fn execute<T: DirectoryTree, L: RunLog>(
    ctx: &AppContext<T, L>,
    options: &NormalizeOptions,
) -> Result<NormalizeOutcome, AppError> {
    let tree = ctx.store();
    let log = ctx.log();
    let started = Local::now();

    log.info(&format!("\n{}", RULE));
    log.info("APOSTROPHE STANDARDIZATION TOOL");
    log.info(RULE);
    log.info(&format!("Base Directory: {}", options.base_dir.display()));
    log.info(&format!("Dry Run: {}", options.simulate));
    log.info(&format!("{}\n", RULE));

    let discovery = discover(tree, log, &options.base_dir)?;
    let ledger = RenameRun::new(tree, log, options.simulate).run(discovery);
    let validation = validate(tree, log, &ledger, options.simulate);

    let summary_path = options.report_dir.join(summary_file_name(&started));
    log.info(&format!("\nCreating summary log: {}", summary_path.display()));
    let summary = render_summary(&ledger, &options.base_dir, options.simulate, &Local::now());
    write_summary(&summary_path, &summary)?;
    log.info(&format!("Summary log created: {}", summary_path.display()));

    log.info(&format!("\n{}", RULE));
    log.info("FINAL RESULTS");
    log.info(RULE);
    log.info(&format!("Directories Renamed: {}", ledger.renamed().len()));
    log.info(&format!("Directories Skipped: {}", ledger.skipped().len()));
    log.info(&format!("Errors Encountered: {}", ledger.errored().len()));
    log.info(RULE);

    if validation.passed() {
        log.info("\n✅ Apostrophe standardization completed successfully!");
    } else {
        log.warn("\n⚠️ Apostrophe standardization completed with validation issues");
    }

    Ok(NormalizeOutcome { ledger, validation, summary_path })
}

fn write_summary(path: &Path, content: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
