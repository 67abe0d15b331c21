//! Normalize command implementation.

use std::path::Path;

use crate::domain::{AppError, FolioConfig};

pub fn run_normalize(
    config: &FolioConfig,
    base_dir: &Path,
    simulate: bool,
) -> Result<i32, AppError> {
    let outcome = crate::app::api::normalize(config, base_dir, simulate)?;

    println!("\nSee {} for details", outcome.summary_path.display());
    Ok(outcome.exit_code())
}
