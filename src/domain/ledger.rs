//! Per-run record of rename outcomes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a single directory could not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("Destination already exists")]
    DestinationExists,

    #[error("Failed to save metadata: {0}")]
    MetadataCaptureFailed(String),

    /// Raised after a successful rename; reported as a warning, never recorded as an error.
    #[error("Failed to restore metadata: {0}")]
    MetadataRestoreFailed(String),

    #[error("{0}")]
    RenameFailed(String),
}

/// Terminal state of one directory in a rename run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Skipped,
    Renamed { to: PathBuf, restore_warning: Option<RenameError> },
    Errored(RenameError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErroredEntry {
    pub path: PathBuf,
    pub error: RenameError,
}

/// Ordered outcomes of one run: renamed pairs, skipped paths, errored paths.
///
/// Restore warnings are kept apart; their directories still count as renamed.
#[derive(Debug, Clone, Default)]
pub struct OperationLedger {
    renamed: Vec<RenamedEntry>,
    skipped: Vec<PathBuf>,
    errored: Vec<ErroredEntry>,
    restore_warnings: Vec<ErroredEntry>,
}

impl OperationLedger {
    pub fn record(&mut self, path: PathBuf, outcome: DirectoryOutcome) {
        match outcome {
            DirectoryOutcome::Skipped => self.skipped.push(path),
            DirectoryOutcome::Renamed { to, restore_warning } => {
                if let Some(error) = restore_warning {
                    self.restore_warnings.push(ErroredEntry { path: to.clone(), error });
                }
                self.renamed.push(RenamedEntry { from: path, to })
            }
            DirectoryOutcome::Errored(error) => self.errored.push(ErroredEntry { path, error }),
        }
    }

    pub fn renamed(&self) -> &[RenamedEntry] {
        &self.renamed
    }

    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    pub fn errored(&self) -> &[ErroredEntry] {
        &self.errored
    }

    /// Renamed directories whose metadata could not be put back, keyed by new path.
    pub fn restore_warnings(&self) -> &[ErroredEntry] {
        &self.restore_warnings
    }

    pub fn total(&self) -> usize {
        self.renamed.len() + self.skipped.len() + self.errored.len()
    }

    /// Where `path` lives after every recorded rename has been applied in order.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        rebase_through(path, &self.renamed)
    }

    /// Final on-disk location of the `index`-th renamed entry, following later ancestor renames.
    pub fn final_location(&self, index: usize) -> Option<PathBuf> {
        let entry = self.renamed.get(index)?;
        Some(rebase_through(&entry.to, &self.renamed[index + 1..]))
    }
}

fn rebase_through(path: &Path, renames: &[RenamedEntry]) -> PathBuf {
    let mut current = path.to_path_buf();
    for entry in renames {
        if let Ok(rest) = current.strip_prefix(&entry.from) {
            current = if rest.as_os_str().is_empty() {
                entry.to.clone()
            } else {
                entry.to.join(rest)
            };
        }
    }
    current
}
