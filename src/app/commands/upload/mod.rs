//! `folio upload`: push local gallery or collage media to CMS projects.

mod fetch;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::{AppError, Project, UploadMode, is_uploadable};
use crate::ports::{CmsClient, MediaLink, MediaStore, RunLog};

pub use fetch::fetch_all_projects;

const PAYLOAD_TOO_LARGE: u16 = 413;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub media_root: PathBuf,
    pub mode: UploadMode,
    pub include_videos: bool,
    /// Fetch drafts and leave published projects alone.
    pub draft_only: bool,
    pub dry_run: bool,
    pub page_size: u32,
    /// Receives one `[TOO_LARGE] <path>` line per rejected file.
    pub too_large_log: PathBuf,
}

#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub projects: usize,
    pub uploaded: Vec<PathBuf>,
    pub linked: Vec<u64>,
    pub missing_folders: Vec<String>,
    pub empty_folders: Vec<String>,
    pub skipped_published: Vec<u64>,
    pub failures: Vec<String>,
}

impl UploadOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() { 0 } else { 1 }
    }
}

pub fn execute<S: MediaStore, L: RunLog, C: CmsClient>(
    ctx: &AppContext<S, L>,
    cms: &C,
    options: &UploadOptions,
) -> Result<UploadOutcome, AppError> {
    let log = ctx.log();
    if options.dry_run {
        log.info("[DRY_RUN] No files will be uploaded and no projects updated");
    }

    let projects = fetch_all_projects(cms, log, options.page_size, options.draft_only)
        .inspect_err(|err| log.error(&format!("[ERROR] Failed to fetch projects: {}", err)))?;

    let mut outcome = UploadOutcome { projects: projects.len(), ..UploadOutcome::default() };
    for project in &projects {
        process_project(ctx, cms, options, project, &mut outcome);
    }

    log.info(&format!(
        "Done: {} files uploaded, {} projects updated, {} failures",
        outcome.uploaded.len(),
        outcome.linked.len(),
        outcome.failures.len()
    ));
    Ok(outcome)
}

fn process_project<S: MediaStore, L: RunLog, C: CmsClient>(
    ctx: &AppContext<S, L>,
    cms: &C,
    options: &UploadOptions,
    project: &Project,
    outcome: &mut UploadOutcome,
) {
    let log = ctx.log();
    let field = options.mode.media_field();
    let folder_name = project.folder_name();
    let media_subdir = format!("{}{}", folder_name, options.mode.folder_suffix());
    let media_folder = options.media_root.join(&folder_name).join(&media_subdir);

    let files = match ctx.store().child_files(&media_folder) {
        Ok(files) => files,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log.warn(&format!("[MISSING_FOLDER] {}", media_subdir));
            outcome.missing_folders.push(media_subdir);
            return;
        }
        Err(err) => {
            log.error(&format!("[ERROR] Could not read {}: {}", media_folder.display(), err));
            outcome.failures.push(format!("{}: {}", media_folder.display(), err));
            return;
        }
    };

    let media: Vec<PathBuf> =
        files.into_iter().filter(|file| is_uploadable(file, options.include_videos)).collect();
    if media.is_empty() {
        log.warn(&format!("[NO_MEDIA_FILES] {}", media_subdir));
        outcome.empty_folders.push(media_subdir);
        return;
    }

    if options.draft_only && project.published {
        log.info(&format!("[SKIPPED] Project {} is published; skipping upload.", project.id));
        outcome.skipped_published.push(project.id);
        return;
    }

    if options.dry_run {
        for file in &media {
            log.info(&format!(
                "[DRY_RUN] Would upload {} → {} ({})",
                file.display(),
                folder_name,
                field
            ));
        }
        log.info(&format!(
            "[DRY_RUN] Would update project {} with {}: {} files",
            project.id,
            field,
            media.len()
        ));
        return;
    }

    let mut media_ids = Vec::new();
    for file in &media {
        match cms.upload_file(file) {
            Ok(uploaded) => {
                log.info(&format!("[UPLOADED] {} → {} ({})", file.display(), folder_name, field));
                media_ids.push(uploaded.id);
                outcome.uploaded.push(file.clone());
            }
            Err(err) => {
                log.error(&format!("[ERROR] {} → {}: {}", file.display(), folder_name, err));
                if err.http_status() == Some(PAYLOAD_TOO_LARGE) {
                    record_too_large(log, &options.too_large_log, file);
                }
                outcome.failures.push(format!("{}: {}", file.display(), err));
            }
        }
    }

    if media_ids.is_empty() {
        return;
    }

    let count = media_ids.len();
    let link = MediaLink {
        project_id: project.id,
        field: field.to_string(),
        media_ids,
        preview: options.draft_only,
    };
    match cms.link_media(&link) {
        Ok(()) => {
            log.info(&format!(
                "[SUCCESS] Updated project {} with {} (Total: {})",
                project.id, field, count
            ));
            outcome.linked.push(project.id);
        }
        Err(err) => {
            log.error(&format!("[ERROR] Failed to update project {}: {}", project.id, err));
            outcome.failures.push(format!("project {}: {}", project.id, err));
        }
    }
}

fn record_too_large<L: RunLog>(log: &L, too_large_log: &Path, file: &Path) {
    if let Err(err) = append_line(too_large_log, &format!("[TOO_LARGE] {}", file.display())) {
        log.warn(&format!("⚠️ Could not write {}: {}", too_large_log.display(), err));
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
