//! Run log port.

use std::fmt;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for the human-readable progress of a command.
///
/// Logging never fails from the caller's point of view; sinks swallow their own write errors.
pub trait RunLog {
    fn record(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }
}
