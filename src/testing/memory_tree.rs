//! In-memory directory tree with failure injection.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::domain::{AppError, MetadataSnapshot};
use crate::ports::{DirectoryListing, DirectoryTree};

/// Directory tree double that records every rename and restore.
#[derive(Clone, Debug, Default)]
pub struct MemoryTree {
    dirs: Arc<Mutex<BTreeMap<PathBuf, MetadataSnapshot>>>,
    renames: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
    restores: Arc<Mutex<Vec<PathBuf>>>,
    fail_capture: BTreeSet<PathBuf>,
    fail_rename: BTreeSet<PathBuf>,
    fail_restore: bool,
    unreadable_root: bool,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryTree {
    /// Seed the given directories (ancestors are not implied).
    pub fn with_dirs(paths: &[&str]) -> Self {
        let tree = Self::default();
        for path in paths {
            tree.add_dir(path);
        }
        tree
    }

    pub fn add_dir(&self, path: &str) {
        self.add_path(PathBuf::from(path));
    }

    /// Seed a directory whose name may not be valid UTF-8.
    pub fn add_path(&self, path: PathBuf) {
        let mut dirs = self.dirs.lock().unwrap();
        let count = dirs.len() as u64;
        dirs.insert(path, snapshot(count));
    }

    pub fn fail_capture_for(mut self, path: &str) -> Self {
        self.fail_capture.insert(PathBuf::from(path));
        self
    }

    pub fn fail_rename_for(mut self, path: &str) -> Self {
        self.fail_rename.insert(PathBuf::from(path));
        self
    }

    pub fn fail_restores(mut self) -> Self {
        self.fail_restore = true;
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.unreadable_root = true;
        self
    }

    /// The directory is listed but nothing below it is, and it is reported as unreadable.
    pub fn unreadable_subtree(mut self, path: &str) -> Self {
        self.unreadable.insert(PathBuf::from(path));
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains_key(Path::new(path))
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.dirs.lock().unwrap().keys().cloned().collect()
    }

    pub fn renames(&self) -> Vec<(PathBuf, PathBuf)> {
        self.renames.lock().unwrap().clone()
    }

    pub fn restores(&self) -> Vec<PathBuf> {
        self.restores.lock().unwrap().clone()
    }
}

fn snapshot(seed: u64) -> MetadataSnapshot {
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000 + seed);
    MetadataSnapshot {
        mode: 0o755,
        uid: Some(1000),
        gid: Some(1000),
        accessed: at,
        modified: at,
        changed: Some(at),
        readonly: false,
    }
}

impl DirectoryTree for MemoryTree {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains_key(path)
    }

    fn list_directories(&self, root: &Path) -> Result<DirectoryListing, AppError> {
        if self.unreadable_root {
            return Err(AppError::Traversal {
                path: root.to_path_buf(),
                details: "Permission denied".to_string(),
            });
        }
        let hidden = |p: &Path| self.unreadable.iter().any(|u| p.starts_with(u) && p != u);
        let dirs = self
            .dirs
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root && !hidden(p))
            .cloned()
            .collect();
        let unreadable = self
            .unreadable
            .iter()
            .filter(|p| p.starts_with(root))
            .map(|p| (p.clone(), "Permission denied (os error 13)".to_string()))
            .collect();
        Ok(DirectoryListing { dirs, unreadable })
    }

    fn capture_metadata(&self, path: &Path) -> io::Result<MetadataSnapshot> {
        if self.fail_capture.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"));
        }
        self.dirs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.fail_rename.contains(from) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"));
        }
        let mut dirs = self.dirs.lock().unwrap();
        if !dirs.contains_key(from) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }
        if dirs.contains_key(to) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "File exists"));
        }

        let moved: Vec<PathBuf> = dirs.keys().filter(|p| p.starts_with(from)).cloned().collect();
        for old in moved {
            if let Some(meta) = dirs.remove(&old) {
                let rest = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new =
                    if rest.as_os_str().is_empty() { to.to_path_buf() } else { to.join(rest) };
                dirs.insert(new, meta);
            }
        }
        self.renames.lock().unwrap().push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn restore_metadata(&self, path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
        if self.fail_restore {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Operation not permitted"));
        }
        self.dirs.lock().unwrap().insert(path.to_path_buf(), snapshot.clone());
        self.restores.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
