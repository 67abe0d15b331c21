//! CLI Adapter.

mod collages;
mod normalize;
mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use crate::domain::{AppError, FolioConfig, UploadMode, load_config};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(
    about = "Tidy project folder names, place collages and publish media to the CMS",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace straight apostrophes with typographic ones in directory names
    #[clap(visible_alias = "n")]
    Normalize {
        /// Directory searched for year-prefixed folders
        base_dir: PathBuf,
        /// Log intended renames without touching the filesystem
        #[arg(short = 's', long, visible_alias = "dry-run")]
        simulate: bool,
        /// Directory for the run log and summary report
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Copy flattened collages into their matching project collage folders
    #[clap(visible_alias = "c")]
    Collages {
        /// Directory holding the flattened collage images
        #[arg(long)]
        source: Option<PathBuf>,
        /// Root of the year/project folder tree
        #[arg(long)]
        projects: Option<PathBuf>,
        /// Minimum similarity (0.0 to 1.0) for a folder match
        #[arg(long)]
        cutoff: Option<f64>,
        /// Log intended copies without copying
        #[arg(short = 's', long, visible_alias = "dry-run")]
        simulate: bool,
        /// Directory for the match report
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Upload project media to the CMS and link it to each project
    #[clap(visible_alias = "u")]
    Upload {
        /// Root of the year/project folder tree
        #[arg(long)]
        media_root: Option<PathBuf>,
        /// Media set to upload (gallery, collage)
        #[arg(long)]
        mode: Option<UploadMode>,
        /// Also upload video files
        #[arg(long)]
        include_videos: bool,
        /// Only update unpublished (draft) projects
        #[arg(long)]
        draft_only: bool,
        /// Fetch projects and log intended uploads without sending files
        #[arg(long)]
        dry_run: bool,
        /// CMS base URL
        #[arg(long)]
        base_url: Option<Url>,
        /// Directory for the upload logs
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Normalize { base_dir, simulate, log_dir } => {
            resolve_config(cli.config, log_dir, |_| {})
                .and_then(|config| normalize::run_normalize(&config, &base_dir, simulate))
        }
        Commands::Collages { source, projects, cutoff, simulate, log_dir } => {
            resolve_config(cli.config, log_dir, |config| {
                let settings = &mut config.collages;
                settings.source_dir = source.or(settings.source_dir.take());
                settings.project_root = projects.or(settings.project_root.take());
                settings.cutoff = cutoff.unwrap_or(settings.cutoff);
            })
            .and_then(|config| collages::run_collages(&config, simulate))
        }
        Commands::Upload {
            media_root,
            mode,
            include_videos,
            draft_only,
            dry_run,
            base_url,
            log_dir,
        } => resolve_config(cli.config, log_dir, |config| {
            let settings = &mut config.upload;
            settings.media_root = media_root.or(settings.media_root.take());
            settings.mode = mode.unwrap_or(settings.mode);
            settings.include_videos |= include_videos;
            settings.draft_only |= draft_only;
            if let Some(url) = base_url {
                config.cms.base_url = url;
            }
        })
        .and_then(|config| upload::run_upload(&config, dry_run)),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load the config file, then apply command-line overrides and re-validate.
fn resolve_config(
    path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    overrides: impl FnOnce(&mut FolioConfig),
) -> Result<FolioConfig, AppError> {
    let mut config = load_config(path.as_deref())?;
    if let Some(dir) = log_dir {
        config.logging.dir = dir;
    }
    overrides(&mut config);
    config.validate()?;
    Ok(config)
}
