//! Upload command implementation.

use crate::domain::{AppError, FolioConfig};

pub fn run_upload(config: &FolioConfig, dry_run: bool) -> Result<i32, AppError> {
    let outcome = crate::app::api::upload_media(config, dry_run)?;

    if outcome.failures.is_empty() {
        println!("✅ Processed {} projects", outcome.projects);
    } else {
        eprintln!("❌ {} upload or link failures:", outcome.failures.len());
        for failure in &outcome.failures {
            eprintln!("  • {}", failure);
        }
    }
    Ok(outcome.exit_code())
}
