use crate::ports::RunLog;

/// Application context holding dependencies for command execution.
pub struct AppContext<S, L: RunLog> {
    store: S,
    log: L,
}

impl<S, L: RunLog> AppContext<S, L> {
    /// Create a new application context.
    pub fn new(store: S, log: L) -> Self {
        Self { store, log }
    }

    /// Get a reference to the filesystem store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the run log.
    pub fn log(&self) -> &L {
        &self.log
    }
}
