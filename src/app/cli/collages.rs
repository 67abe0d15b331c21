//! Collages command implementation.

use crate::domain::{AppError, FolioConfig};

pub fn run_collages(config: &FolioConfig, simulate: bool) -> Result<i32, AppError> {
    let outcome = crate::app::api::place_collages(config, simulate)?;

    println!(
        "{} placed, {} unmatched, {} unused folders, {} failed",
        outcome.placed.len(),
        outcome.unmatched.len(),
        outcome.unused.len(),
        outcome.failed.len()
    );
    Ok(outcome.exit_code())
}
