//! Year-root discovery and depth ordering.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, is_year_prefixed_name};
use crate::ports::{DirectoryTree, RunLog};

/// Directories a rename run will visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Year-prefixed directories anywhere below the base.
    pub year_roots: Vec<PathBuf>,
    /// Every directory below a year root, year roots themselves excluded.
    pub descendants: Vec<PathBuf>,
}

/// Walk `base` once and split its directories into year roots and their descendants.
pub fn discover<T: DirectoryTree, L: RunLog>(
    tree: &T,
    log: &L,
    base: &Path,
) -> Result<Discovery, AppError> {
    log.info("Searching for year-prefixed directories...");
    let listing = tree.list_directories(base)?;

    for (path, reason) in &listing.unreadable {
        log.warn(&format!("⚠️ Could not read {}: {}", path.display(), reason));
    }

    let year_roots: Vec<PathBuf> = listing
        .dirs
        .iter()
        .filter(|dir| dir.file_name().is_some_and(is_year_prefixed_name))
        .cloned()
        .collect();
    log.info(&format!("Found {} year-prefixed directories", year_roots.len()));

    log.info("Collecting all subdirectories...");
    let roots: HashSet<&PathBuf> = year_roots.iter().collect();
    let descendants = listing
        .dirs
        .iter()
        .filter(|dir| !roots.contains(dir))
        .filter(|dir| year_roots.iter().any(|root| dir.starts_with(root)))
        .cloned()
        .collect();

    Ok(Discovery { year_roots, descendants })
}

/// Number of path components.
pub fn depth(path: &Path) -> usize {
    path.components().count()
}

/// Stable sort, deepest paths first.
pub fn order_deepest_first(paths: &mut [PathBuf]) {
    paths.sort_by_key(|path| Reverse(depth(path)));
}
