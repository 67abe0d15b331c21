use std::sync::{Arc, Mutex};

use crate::ports::{LogLevel, RunLog};

/// Run log double that keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingLog {
    records: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Whether any record at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records.lock().unwrap().iter().any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.records.lock().unwrap().iter().filter(|(l, _)| *l == level).count()
    }
}

impl RunLog for RecordingLog {
    fn record(&self, level: LogLevel, message: &str) {
        self.records.lock().unwrap().push((level, message.to_string()));
    }
}
