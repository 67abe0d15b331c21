//! Configuration models loaded from `folio.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, UploadMode};

/// Complete tool configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub collages: CollageConfig,
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

impl FolioConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.collages.validate()?;
        self.cms.validate()?;
        self.upload.validate()?;
        Ok(())
    }
}

/// Where log and report files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { dir: default_log_dir() }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Append-only diagnostic log.
    #[serde(default = "default_normalize_log")]
    pub log_file: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { log_file: default_normalize_log() }
    }
}

fn default_normalize_log() -> String {
    "apostrophe_standardization.log".to_string()
}

/// Collage placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollageConfig {
    /// Directory holding the flattened collage images.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Root of the year-prefixed project folders.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
    #[serde(default = "default_collage_folder_suffix")]
    pub folder_suffix: String,
    /// Minimum similarity ratio for a folder match.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default = "default_collage_log")]
    pub log_file: String,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            project_root: None,
            file_suffix: default_file_suffix(),
            folder_suffix: default_collage_folder_suffix(),
            cutoff: default_cutoff(),
            log_file: default_collage_log(),
        }
    }
}

impl CollageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(AppError::config_error("collages.cutoff must be between 0.0 and 1.0"));
        }
        if self.file_suffix.trim().is_empty() {
            return Err(AppError::config_error("collages.file_suffix must not be empty"));
        }
        if self.folder_suffix.trim().is_empty() {
            return Err(AppError::config_error("collages.folder_suffix must not be empty"));
        }
        Ok(())
    }
}

fn default_file_suffix() -> String {
    "_composite_collage-0.png".to_string()
}

fn default_collage_folder_suffix() -> String {
    "_collage".to_string()
}

fn default_cutoff() -> f64 {
    0.6
}

fn default_collage_log() -> String {
    "collage_mover_log.txt".to_string()
}

/// CMS endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CmsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl CmsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("cms.timeout_secs must be greater than 0"));
        }
        if self.page_size == 0 {
            return Err(AppError::config_error("cms.page_size must be greater than 0"));
        }
        if self.token_env.trim().is_empty() {
            return Err(AppError::config_error("cms.token_env must not be empty"));
        }
        Ok(())
    }

    /// Bearer token from the configured environment variable, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.trim().is_empty())
    }
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:1337").expect("Default CMS URL must be valid")
}

fn default_token_env() -> String {
    "STRAPI_API_TOKEN".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

/// Media upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Root of the local project folders.
    #[serde(default)]
    pub media_root: Option<PathBuf>,
    #[serde(default)]
    pub mode: UploadMode,
    #[serde(default)]
    pub include_videos: bool,
    /// Only touch unpublished projects.
    #[serde(default)]
    pub draft_only: bool,
    #[serde(default = "default_upload_log")]
    pub log_file: String,
    #[serde(default = "default_too_large_log")]
    pub too_large_log_file: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            media_root: None,
            mode: UploadMode::default(),
            include_videos: false,
            draft_only: false,
            log_file: default_upload_log(),
            too_large_log_file: default_too_large_log(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.log_file.trim().is_empty() || self.too_large_log_file.trim().is_empty() {
            return Err(AppError::config_error("upload log file names must not be empty"));
        }
        Ok(())
    }
}

fn default_upload_log() -> String {
    "strapi_upload_log.txt".to_string()
}

fn default_too_large_log() -> String {
    "strapi_upload_too_large.txt".to_string()
}
