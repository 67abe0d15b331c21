use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, is_year_prefixed};
use crate::ports::{MediaStore, RunLog};

/// Collage folders below `<root>/<year dir>/`, keyed by folder name.
///
/// A later duplicate name replaces an earlier one.
pub fn index_collage_folders<S: MediaStore, L: RunLog>(
    store: &S,
    log: &L,
    project_root: &Path,
    folder_suffix: &str,
) -> Result<BTreeMap<String, PathBuf>, AppError> {
    let year_dirs = store
        .child_directories(project_root)
        .map_err(|err| missing_or_io(project_root, err))?;

    let mut index = BTreeMap::new();
    for year_dir in year_dirs {
        if !file_name(&year_dir).is_some_and(is_year_prefixed) {
            continue;
        }
        let projects = match store.child_directories(&year_dir) {
            Ok(projects) => projects,
            Err(err) => {
                log.warn(&format!("⚠️ Could not read {}: {}", year_dir.display(), err));
                continue;
            }
        };
        for project in projects {
            if let Some(name) = file_name(&project).filter(|n| n.ends_with(folder_suffix)) {
                index.insert(name.to_string(), project.clone());
            }
        }
    }
    Ok(index)
}

/// Files in `source_dir` whose names end with `file_suffix`, sorted by name.
pub fn collage_sources<S: MediaStore>(
    store: &S,
    source_dir: &Path,
    file_suffix: &str,
) -> Result<Vec<PathBuf>, AppError> {
    let files = store.child_files(source_dir).map_err(|err| missing_or_io(source_dir, err))?;
    Ok(files
        .into_iter()
        .filter(|file| file_name(file).is_some_and(|n| n.ends_with(file_suffix)))
        .collect())
}

/// Folder a collage file should land in: its stem minus the suffix stem, plus the folder suffix.
pub fn expected_folder(file: &Path, file_suffix: &str, folder_suffix: &str) -> String {
    let stem = file.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let suffix_stem = Path::new(file_suffix)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base =
        if suffix_stem.is_empty() { stem.into_owned() } else { stem.replace(&suffix_stem, "") };
    format!("{}{}", base, folder_suffix)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn missing_or_io(path: &Path, err: io::Error) -> AppError {
    match err.kind() {
        io::ErrorKind::NotFound => AppError::DirectoryNotFound(path.to_path_buf()),
        io::ErrorKind::NotADirectory => AppError::NotADirectory(path.to_path_buf()),
        _ => AppError::Io(err),
    }
}
