//! Filesystem ports used by the rename and collage commands.

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, MetadataSnapshot};

/// Directories found below a root, plus the subtrees that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Parents before children, siblings ordered by name.
    pub dirs: Vec<PathBuf>,
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Port for directory traversal and metadata-preserving renames.
pub trait DirectoryTree {
    fn exists(&self, path: &Path) -> bool;

    /// Every directory strictly below `root`.
    ///
    /// A missing root yields an empty listing. A root that exists but cannot be read is an error.
    fn list_directories(&self, root: &Path) -> Result<DirectoryListing, AppError>;

    fn capture_metadata(&self, path: &Path) -> io::Result<MetadataSnapshot>;

    /// Rename without replacing an existing destination.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn restore_metadata(&self, path: &Path, snapshot: &MetadataSnapshot) -> io::Result<()>;
}

/// Port for the flat file listings and copies the collage placer needs.
pub trait MediaStore {
    /// Immediate child directories, sorted by name.
    fn child_directories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Immediate regular files, sorted by name.
    fn child_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;
}
