use std::path::PathBuf;

use crate::domain::OperationLedger;
use crate::ports::{DirectoryTree, RunLog};

/// Result of checking a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Passed,
    NothingProcessed,
    Missing(Vec<PathBuf>),
}

impl Validation {
    pub fn passed(&self) -> bool {
        matches!(self, Validation::Passed)
    }
}

/// Confirm every renamed directory is present at its final location.
///
/// Existence checks are skipped in simulate mode; an empty ledger fails either way.
pub fn validate<T: DirectoryTree, L: RunLog>(
    tree: &T,
    log: &L,
    ledger: &OperationLedger,
    simulate: bool,
) -> Validation {
    log.info("\nValidating changes...");

    let mut missing = Vec::new();
    if !simulate {
        for index in 0..ledger.renamed().len() {
            let Some(location) = ledger.final_location(index) else { continue };
            if !tree.exists(&location) {
                log.error(&format!(
                    "❌ Validation failed: {} does not exist after renaming",
                    location.display()
                ));
                missing.push(location);
            }
        }
    }
    if !missing.is_empty() {
        return Validation::Missing(missing);
    }

    if ledger.total() == 0 {
        log.warn("⚠️ No directories were processed");
        return Validation::NothingProcessed;
    }

    log.info("✅ Validation successful");
    Validation::Passed
}
