//! Configuration file discovery and parsing.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, FolioConfig};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "folio.toml";

/// Load configuration.
///
/// An explicit path must exist. Without one, `folio.toml` in the working directory is used when
/// present, otherwise defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<FolioConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::ConfigFileMissing(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = std::env::current_dir()?.join(CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(FolioConfig::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<FolioConfig, AppError> {
    let config: FolioConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
