use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for folio operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file was named explicitly but does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigFileMissing(PathBuf),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// A required input directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The base directory could not be walked at all.
    #[error("Cannot traverse '{}': {details}", path.display())]
    Traversal { path: PathBuf, details: String },

    /// CMS request failed.
    #[error("{message}")]
    CmsApiError { message: String, status: Option<u16> },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn cms<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::CmsApiError { message: message.into(), status }
    }

    /// HTTP status attached to a CMS failure, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AppError::CmsApiError { status, .. } => *status,
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_) | AppError::TomlParseError(_) => {
                io::ErrorKind::InvalidInput
            }
            AppError::ConfigFileMissing(_) | AppError::DirectoryNotFound(_) => {
                io::ErrorKind::NotFound
            }
            AppError::NotADirectory(_) => io::ErrorKind::InvalidInput,
            AppError::Traversal { .. } => io::ErrorKind::PermissionDenied,
            AppError::CmsApiError { .. } => io::ErrorKind::Other,
        }
    }
}
