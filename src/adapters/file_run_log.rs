//! Console + append-only file implementation of the run log.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::AppError;
use crate::ports::{LogLevel, RunLog};

/// Echoes records to the terminal and appends them, timestamped, to a log file.
///
/// `Debug` records only reach the file. `Error` records go to stderr.
#[derive(Debug)]
pub struct FileRunLog {
    path: PathBuf,
    file: File,
    echo: bool,
}

impl FileRunLog {
    /// Open (or create) `path` for appending, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { path: path.to_path_buf(), file, echo: true })
    }

    /// A log that only writes to its file.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunLog for FileRunLog {
    fn record(&self, level: LogLevel, message: &str) {
        if self.echo {
            echo(level, message);
        }

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        let mut file = &self.file;
        // write errors are dropped; the console copy still shows
        let _ = writeln!(file, "{} - {} - {}", stamp, level, message);
    }
}

/// Terminal-only log for commands that write their own report instead of a run log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRunLog;

impl RunLog for ConsoleRunLog {
    fn record(&self, level: LogLevel, message: &str) {
        echo(level, message);
    }
}

fn echo(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => {}
        LogLevel::Info | LogLevel::Warn => println!("{}", message),
        LogLevel::Error => eprintln!("{}", message),
    }
}
