//! Bulk rename: one pass over discovered directories, deepest first, year roots last.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::{
    DirectoryOutcome, MetadataSnapshot, OperationLedger, RenameError, standardized_name,
};
use crate::ports::{DirectoryTree, RunLog};

use super::discovery::{Discovery, order_deepest_first};

const PROGRESS_EVERY: usize = 10;

/// State owned by a single rename run.
pub struct RenameRun<'a, T: DirectoryTree, L: RunLog> {
    tree: &'a T,
    log: &'a L,
    simulate: bool,
    ledger: OperationLedger,
    snapshots: HashMap<PathBuf, MetadataSnapshot>,
}

impl<'a, T: DirectoryTree, L: RunLog> RenameRun<'a, T, L> {
    pub fn new(tree: &'a T, log: &'a L, simulate: bool) -> Self {
        Self { tree, log, simulate, ledger: OperationLedger::default(), snapshots: HashMap::new() }
    }

    /// Process every descendant, then the year roots, and hand back the ledger.
    pub fn run(mut self, discovery: Discovery) -> OperationLedger {
        let Discovery { mut year_roots, mut descendants } = discovery;
        order_deepest_first(&mut descendants);
        order_deepest_first(&mut year_roots);

        let total = descendants.len();
        self.log.info(&format!("Processing {} directories...", total));
        for (index, dir) in descendants.into_iter().enumerate() {
            let done = index + 1;
            if done % PROGRESS_EVERY == 0 || done == total {
                self.log.info(&format!("Progress: {}/{} directories processed", done, total));
            }
            self.process(dir);
        }

        self.log.info("\nProcessing year directories...");
        for root in year_roots {
            self.process(root);
        }

        self.ledger
    }

    fn process(&mut self, discovered: PathBuf) {
        // Only real renames move queued paths.
        let path = if self.simulate { discovered } else { self.ledger.resolve(&discovered) };
        let outcome = self.rename_one(&path);
        self.ledger.record(path, outcome);
    }

    fn rename_one(&mut self, path: &Path) -> DirectoryOutcome {
        let Some(name) = path.file_name().and_then(standardized_name) else {
            self.log.debug(&format!("Skipping: {}", path.display()));
            return DirectoryOutcome::Skipped;
        };
        let target = path.with_file_name(name);

        if self.tree.exists(&target) {
            self.log.warn(&format!(
                "⚠️ Cannot rename {} to {} - destination already exists",
                path.display(),
                target.display()
            ));
            return DirectoryOutcome::Errored(RenameError::DestinationExists);
        }

        match self.tree.capture_metadata(path) {
            Ok(snapshot) => {
                self.snapshots.insert(path.to_path_buf(), snapshot);
            }
            Err(err) => {
                self.log.error(&format!("Error saving metadata for {}: {}", path.display(), err));
                return DirectoryOutcome::Errored(RenameError::MetadataCaptureFailed(
                    err.to_string(),
                ));
            }
        }

        if self.simulate {
            self.snapshots.remove(path);
            self.log.info(&format!(
                "[DRY RUN] Would rename: {} → {}",
                path.display(),
                target.display()
            ));
            return DirectoryOutcome::Renamed { to: target, restore_warning: None };
        }

        if let Err(err) = self.tree.rename(path, &target) {
            self.snapshots.remove(path);
            self.log.error(&format!("❌ Error renaming {}: {}", path.display(), err));
            return DirectoryOutcome::Errored(RenameError::RenameFailed(err.to_string()));
        }
        self.log.info(&format!("✅ Renamed: {} → {}", path.display(), target.display()));

        let restore_warning = self.restore(path, &target);
        DirectoryOutcome::Renamed { to: target, restore_warning }
    }

    fn restore(&mut self, old: &Path, new: &Path) -> Option<RenameError> {
        let snapshot = self.snapshots.remove(old)?;
        match self.tree.restore_metadata(new, &snapshot) {
            Ok(()) => None,
            Err(err) => {
                self.log.warn(&format!(
                    "⚠️ Failed to restore metadata for {}: {}",
                    new.display(),
                    err
                ));
                Some(RenameError::MetadataRestoreFailed(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::normalize::discovery::discover;
    use crate::ports::LogLevel;
    use crate::testing::{MemoryTree, RecordingLog};

    const R: &str = "\u{2019}";

    fn run(tree: &MemoryTree, simulate: bool) -> (OperationLedger, RecordingLog) {
        let log = RecordingLog::new();
        let discovery = discover(tree, &log, Path::new("/base")).unwrap();
        let ledger = RenameRun::new(tree, &log, simulate).run(discovery);
        (ledger, log)
    }

    fn deep_tree() -> MemoryTree {
        MemoryTree::with_dirs(&[
            "/base",
            "/base/2023 Ann's House",
            "/base/2023 Ann's House/Bob's Room",
            "/base/2023 Ann's House/Bob's Room/Cat's Bed",
            "/base/2023 Ann's House/Bob's Room/Cat's Bed/Dog's Toy",
        ])
    }

    #[test]
    fn children_are_renamed_before_parents() {
        let tree = deep_tree();
        let (ledger, _) = run(&tree, false);

        let order: Vec<String> = tree
            .renames()
            .iter()
            .map(|(from, _)| from.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(order, vec!["Dog's Toy", "Cat's Bed", "Bob's Room", "2023 Ann's House"]);
        assert_eq!(ledger.renamed().len(), 4);
        assert!(ledger.errored().is_empty());
        assert!(tree.contains(&format!(
            "/base/2023 Ann{R}s House/Bob{R}s Room/Cat{R}s Bed/Dog{R}s Toy"
        )));
    }

    #[test]
    fn every_rename_targets_a_live_path() {
        let tree = deep_tree();
        run(&tree, false);

        let renames = tree.renames();
        for (index, (_, to)) in renames.iter().enumerate() {
            for (later_from, _) in &renames[index + 1..] {
                assert!(
                    !later_from.starts_with(to),
                    "{:?} renamed after child {:?}",
                    later_from,
                    to
                );
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn names_that_are_not_utf8_are_still_renamed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tree = MemoryTree::with_dirs(&["/base", "/base/2020 Show"]);
        let raw = Path::new("/base/2020 Show").join(OsStr::from_bytes(b"Jo's \xff Room"));
        tree.add_path(raw.clone());

        let (ledger, _) = run(&tree, false);

        let expected =
            Path::new("/base/2020 Show").join(OsStr::from_bytes(b"Jo\xe2\x80\x99s \xff Room"));
        assert_eq!(tree.renames(), vec![(raw.clone(), expected.clone())]);
        assert!(tree.exists(&expected));
        assert!(!tree.exists(&raw));
        assert_eq!(ledger.renamed().len(), 1);
        assert_eq!(ledger.skipped(), &[PathBuf::from("/base/2020 Show")]);
    }

    #[test]
    fn collision_is_recorded_and_nothing_moves() {
        let tree = MemoryTree::with_dirs(&[
            "/base",
            "/base/2023 Show",
            "/base/2023 Show/A's Room",
            &format!("/base/2023 Show/A{R}s Room"),
        ]);
        let (ledger, log) = run(&tree, false);

        assert_eq!(ledger.errored().len(), 1);
        assert_eq!(ledger.errored()[0].path, PathBuf::from("/base/2023 Show/A's Room"));
        assert_eq!(ledger.errored()[0].error, RenameError::DestinationExists);
        assert!(tree.contains("/base/2023 Show/A's Room"));
        assert!(tree.contains(&format!("/base/2023 Show/A{R}s Room")));
        assert!(tree.renames().is_empty());
        assert!(log.contains(LogLevel::Warn, "destination already exists"));
    }

    #[test]
    fn capture_failure_blocks_the_rename() {
        let tree = MemoryTree::with_dirs(&["/base", "/base/2020 X", "/base/2020 X/Jo's"])
            .fail_capture_for("/base/2020 X/Jo's");
        let (ledger, _) = run(&tree, false);

        assert!(matches!(ledger.errored()[0].error, RenameError::MetadataCaptureFailed(_)));
        assert!(tree.contains("/base/2020 X/Jo's"));
        assert!(tree.renames().is_empty());
    }

    #[test]
    fn rename_failure_is_recorded_with_os_text() {
        let tree = MemoryTree::with_dirs(&["/base", "/base/2020 X", "/base/2020 X/Jo's"])
            .fail_rename_for("/base/2020 X/Jo's");
        let (ledger, log) = run(&tree, false);

        assert_eq!(
            ledger.errored()[0].error,
            RenameError::RenameFailed("Permission denied".to_string())
        );
        assert!(log.contains(LogLevel::Error, "❌ Error renaming"));
    }

    #[test]
    fn restore_failure_is_only_a_warning() {
        let tree =
            MemoryTree::with_dirs(&["/base", "/base/2020 X", "/base/2020 X/Jo's"]).fail_restores();
        let (ledger, log) = run(&tree, false);

        assert_eq!(ledger.renamed().len(), 1);
        assert!(ledger.errored().is_empty());
        let warned = &ledger.restore_warnings()[0];
        assert_eq!(warned.path, PathBuf::from(format!("/base/2020 X/Jo{R}s")));
        assert!(log.contains(LogLevel::Warn, "Failed to restore metadata"));
    }

    #[test]
    fn metadata_is_restored_onto_the_new_path() {
        let tree = MemoryTree::with_dirs(&["/base", "/base/2020 X", "/base/2020 X/Jo's"]);
        run(&tree, false);
        assert_eq!(tree.restores(), vec![PathBuf::from(format!("/base/2020 X/Jo{R}s"))]);
    }

    #[test]
    fn simulate_mode_mutates_nothing() {
        let tree = deep_tree();
        let before = tree.paths();
        let (ledger, log) = run(&tree, true);

        assert_eq!(tree.paths(), before);
        assert!(tree.renames().is_empty());
        assert_eq!(ledger.renamed().len(), 4);
        assert!(ledger.errored().is_empty());
        assert!(log.contains(LogLevel::Info, "[DRY RUN] Would rename"));
    }

    #[test]
    fn mixed_mark_root_is_left_unchanged() {
        let root = format!("/base/2023 Ste{R}phen's Room");
        let tree = MemoryTree::with_dirs(&["/base", &root]);
        let (ledger, _) = run(&tree, false);

        assert_eq!(ledger.skipped(), &[PathBuf::from(&root)]);
        assert!(tree.contains(&root));
        assert!(tree.renames().is_empty());
    }

    #[test]
    fn nested_year_root_is_rebased_after_ancestor_rename() {
        let tree = MemoryTree::with_dirs(&[
            "/base",
            "/base/2020 Al's",
            "/base/2020 Al's/Kit's",
            "/base/2020 Al's/Kit's/2021 Mo's",
        ]);
        let (ledger, _) = run(&tree, false);

        assert!(ledger.errored().is_empty(), "{:?}", ledger.errored());
        assert_eq!(ledger.renamed().len(), 3);
        assert!(tree.contains(&format!("/base/2020 Al{R}s/Kit{R}s/2021 Mo{R}s")));
    }

    #[test]
    fn progress_is_reported_every_ten_directories() {
        let mut dirs = vec!["/base".to_string(), "/base/2020 Batch".to_string()];
        for i in 0..12 {
            dirs.push(format!("/base/2020 Batch/d{:02}", i));
        }
        let refs: Vec<&str> = dirs.iter().map(String::as_str).collect();
        let tree = MemoryTree::with_dirs(&refs);
        let (ledger, log) = run(&tree, true);

        assert_eq!(ledger.skipped().len(), 13);
        assert!(log.contains(LogLevel::Info, "Progress: 10/12 directories processed"));
        assert!(log.contains(LogLevel::Info, "Progress: 12/12 directories processed"));
    }
}
