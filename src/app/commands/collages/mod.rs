//! `folio collages`: copy flattened collage images into their project's collage folder.

mod index;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::similarity::best_match;
use crate::ports::{MediaStore, RunLog};

pub use index::{collage_sources, expected_folder, index_collage_folders};

#[derive(Debug, Clone)]
pub struct CollageOptions {
    pub source_dir: PathBuf,
    pub project_root: PathBuf,
    pub file_suffix: String,
    pub folder_suffix: String,
    pub cutoff: f64,
    pub simulate: bool,
    /// Unmatched/unused report, rewritten on every run.
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCollage {
    pub file: PathBuf,
    pub folder: PathBuf,
}

#[derive(Debug, Default)]
pub struct CollageOutcome {
    pub placed: Vec<PlacedCollage>,
    pub unmatched: Vec<String>,
    pub unused: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl CollageOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.failed.is_empty() { 0 } else { 1 }
    }
}

pub fn execute<S: MediaStore, L: RunLog>(
    ctx: &AppContext<S, L>,
    options: &CollageOptions,
) -> Result<CollageOutcome, AppError> {
    let store = ctx.store();
    let log = ctx.log();

    let folders = index_collage_folders(store, log, &options.project_root, &options.folder_suffix)?;
    log.info(&format!("Indexed {} collage folders", folders.len()));
    let sources = collage_sources(store, &options.source_dir, &options.file_suffix)?;

    let mut outcome = CollageOutcome::default();
    let mut used = BTreeSet::new();

    for file in sources {
        let file_name =
            file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let wanted = expected_folder(&file, &options.file_suffix, &options.folder_suffix);

        let candidates = folders.keys().map(String::as_str);
        let Some((name, score)) = best_match(&wanted, candidates, options.cutoff) else {
            log.warn(&format!("⚠️ No match found for: {}", file_name));
            outcome.unmatched.push(file_name);
            continue;
        };
        let Some(folder) = folders.get(name) else { continue };
        log.debug(&format!("{} matched {} ({:.3})", wanted, name, score));

        if options.simulate {
            log.info(&format!("[DRY RUN] Would copy {} → {}", file_name, folder.display()));
            used.insert(name.to_string());
            outcome.placed.push(PlacedCollage { file, folder: folder.clone() });
            continue;
        }

        match store.copy_file(&file, &folder.join(&file_name)) {
            Ok(_) => {
                log.info(&format!("✅ Copied {} → {}", file_name, folder.display()));
                used.insert(name.to_string());
                outcome.placed.push(PlacedCollage { file, folder: folder.clone() });
            }
            Err(err) => {
                log.error(&format!("❌ Failed to copy {}: {}", file_name, err));
                outcome.failed.push((file_name, err.to_string()));
            }
        }
    }

    outcome.unused = folders.keys().filter(|name| !used.contains(*name)).cloned().collect();

    write_report(&options.report_path, &outcome)?;
    log.info(&format!("\n📝 Log written to {}", options.report_path.display()));

    Ok(outcome)
}

pub fn render_report(outcome: &CollageOutcome) -> String {
    let mut out = String::from("=== UNMATCHED FILES ===\n");
    for file in &outcome.unmatched {
        out.push_str(&format!("- {}\n", file));
    }
    out.push_str("\n=== UNUSED COLLAGE DIRECTORIES ===\n");
    for dir in &outcome.unused {
        out.push_str(&format!("- {}\n", dir));
    }
    out
}

fn write_report(path: &Path, outcome: &CollageOutcome) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_report(outcome))?;
    Ok(())
}
