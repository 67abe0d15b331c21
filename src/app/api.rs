//! API Facade for the application.
//!
//! Each function wires the filesystem, log and CMS adapters from a resolved configuration and
//! runs one command.

use std::path::{Path, PathBuf};

use crate::adapters::{ConsoleRunLog, FileRunLog, FilesystemTree, HttpCmsClient};
use crate::app::{
    AppContext,
    commands::{collages, normalize, upload},
};
use crate::domain::{AppError, FolioConfig};
use crate::ports::RunLog;

pub use crate::app::commands::collages::{CollageOptions, CollageOutcome, PlacedCollage};
pub use crate::app::commands::normalize::{NormalizeOptions, NormalizeOutcome, Validation};
pub use crate::app::commands::upload::{UploadOptions, UploadOutcome};

/// Create an `AppContext` on the local filesystem, logging to `<log dir>/<file_name>`.
fn create_context(
    config: &FolioConfig,
    file_name: &str,
) -> Result<AppContext<FilesystemTree, FileRunLog>, AppError> {
    let log = FileRunLog::open(&config.logging.dir.join(file_name))?;
    Ok(AppContext::new(FilesystemTree::new(), log))
}

// =============================================================================
// Normalize Command API
// =============================================================================

/// Standardize apostrophes in directory names below `base_dir`.
pub fn normalize(
    config: &FolioConfig,
    base_dir: &Path,
    simulate: bool,
) -> Result<NormalizeOutcome, AppError> {
    let ctx = create_context(config, &config.normalize.log_file)?;
    let options = NormalizeOptions {
        base_dir: base_dir.to_path_buf(),
        simulate,
        report_dir: config.logging.dir.clone(),
    };
    normalize::execute(&ctx, &options)
}

// =============================================================================
// Collages Command API
// =============================================================================

/// Copy flattened collages into their matching project folders.
pub fn place_collages(config: &FolioConfig, simulate: bool) -> Result<CollageOutcome, AppError> {
    let settings = &config.collages;
    let source_dir = required(settings.source_dir.as_ref(), "collages.source_dir (--source)")?;
    let project_root =
        required(settings.project_root.as_ref(), "collages.project_root (--projects)")?;

    let ctx = AppContext::new(FilesystemTree::new(), ConsoleRunLog);
    let options = CollageOptions {
        source_dir,
        project_root,
        file_suffix: settings.file_suffix.clone(),
        folder_suffix: settings.folder_suffix.clone(),
        cutoff: settings.cutoff,
        simulate,
        report_path: config.logging.dir.join(&settings.log_file),
    };
    collages::execute(&ctx, &options)
}

// =============================================================================
// Upload Command API
// =============================================================================

/// Upload local media for every CMS project and link it to the project record.
pub fn upload_media(config: &FolioConfig, dry_run: bool) -> Result<UploadOutcome, AppError> {
    let settings = &config.upload;
    let media_root = required(settings.media_root.as_ref(), "upload.media_root (--media-root)")?;

    let ctx = create_context(config, &settings.log_file)?;
    let cms = HttpCmsClient::from_env(&config.cms)?;
    if !cms.has_token() {
        ctx.log().warn(&format!(
            "⚠️ {} is not set; sending requests without authorization",
            config.cms.token_env
        ));
    }

    let options = UploadOptions {
        media_root,
        mode: settings.mode,
        include_videos: settings.include_videos,
        draft_only: settings.draft_only,
        dry_run,
        page_size: config.cms.page_size,
        too_large_log: config.logging.dir.join(&settings.too_large_log_file),
    };
    upload::execute(&ctx, &cms, &options)
}

fn required(value: Option<&PathBuf>, name: &str) -> Result<PathBuf, AppError> {
    value.cloned().ok_or_else(|| AppError::config_error(format!("{} is required", name)))
}
