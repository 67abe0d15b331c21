use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::domain::{AppError, MetadataSnapshot};
use crate::ports::{DirectoryListing, DirectoryTree, MediaStore};

/// Local filesystem implementation of the directory and media ports.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemTree;

impl FilesystemTree {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryTree for FilesystemTree {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as an occupied name
        fs::symlink_metadata(path).is_ok()
    }

    fn list_directories(&self, root: &Path) -> Result<DirectoryListing, AppError> {
        let mut listing = DirectoryListing::default();

        if !root.exists() {
            return Ok(listing);
        }
        if !root.is_dir() {
            return Err(AppError::NotADirectory(root.to_path_buf()));
        }
        fs::read_dir(root).map_err(|err| AppError::Traversal {
            path: root.to_path_buf(),
            details: err.to_string(),
        })?;

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        listing.dirs.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.into());
                    listing.unreadable.push((path, err.to_string()));
                }
            }
        }

        Ok(listing)
    }

    fn capture_metadata(&self, path: &Path) -> io::Result<MetadataSnapshot> {
        let meta = fs::metadata(path)?;
        MetadataSnapshot::from_metadata(&meta)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.exists(to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            ));
        }
        fs::rename(from, to)
    }

    fn restore_metadata(&self, path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
        let mut failures = Vec::new();

        if let Err(err) = restore_permissions(path, snapshot) {
            failures.push(format!("permissions: {}", err));
        }
        if let Err(err) = restore_ownership(path, snapshot) {
            failures.push(format!("ownership: {}", err));
        }
        if let Err(err) = restore_times(path, snapshot) {
            failures.push(format!("timestamps: {}", err));
        }

        if failures.is_empty() { Ok(()) } else { Err(io::Error::other(failures.join("; "))) }
    }
}

#[cfg(unix)]
fn restore_permissions(path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(snapshot.mode))
}

#[cfg(not(unix))]
fn restore_permissions(path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(snapshot.readonly);
    fs::set_permissions(path, permissions)
}

#[cfg(unix)]
fn restore_ownership(path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
    std::os::unix::fs::chown(path, snapshot.uid, snapshot.gid)
}

#[cfg(not(unix))]
fn restore_ownership(_path: &Path, _snapshot: &MetadataSnapshot) -> io::Result<()> {
    Ok(())
}

// By path, so a directory without the owner read bit still gets its times back.
fn restore_times(path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()> {
    filetime::set_file_times(
        path,
        FileTime::from_system_time(snapshot.accessed),
        FileTime::from_system_time(snapshot.modified),
    )
}

impl MediaStore for FilesystemTree {
    fn child_directories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        children(dir, |ty| ty.is_dir())
    }

    fn child_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        children(dir, |ty| ty.is_file())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }
}

fn children(dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // follow links so a linked project folder still counts; dangling links are ignored
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        if keep(&meta.file_type()) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}
