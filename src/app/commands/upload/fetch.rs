use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::domain::{AppError, Project};
use crate::ports::{CmsClient, ProjectQuery, RunLog};

/// Page through the projects collection, dropping duplicate and malformed entries.
pub fn fetch_all_projects<C: CmsClient, L: RunLog>(
    cms: &C,
    log: &L,
    page_size: u32,
    preview: bool,
) -> Result<Vec<Project>, AppError> {
    let mut projects = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1;

    loop {
        log.debug(&format!("Fetching page {} with page size {}", page, page_size));
        let response = cms.fetch_projects(&ProjectQuery { page, page_size, preview })?;

        let mut valid = 0;
        for entry in &response.entries {
            let id = entry.get("id").and_then(Value::as_u64);
            if let Some(id) = id.filter(|id| seen.contains(id)) {
                log.debug(&format!("Skipping duplicate project ID: {}", id));
                continue;
            }
            match Project::from_entry(entry) {
                Ok(project) => {
                    seen.insert(project.id);
                    projects.push(project);
                    valid += 1;
                }
                Err(reason) => log.warn(&format!("[WARN] Skipping invalid project: {}", reason)),
            }
        }

        let page_count = response.pagination.and_then(|p| p.page_count).unwrap_or(1);
        log.debug(&format!(
            "Page {}/{}: Retrieved {} valid projects (Total so far: {})",
            page,
            page_count,
            valid,
            projects.len()
        ));

        if page >= page_count {
            break;
        }
        page += 1;
    }

    log_by_year(log, &projects);
    Ok(projects)
}

fn log_by_year<L: RunLog>(log: &L, projects: &[Project]) {
    let mut by_year: BTreeMap<&str, usize> = BTreeMap::new();
    for year in projects.iter().filter_map(Project::year) {
        *by_year.entry(year).or_default() += 1;
    }

    log.info("[INFO] Projects by year:");
    for (year, count) in by_year {
        log.info(&format!("  {}: {} projects", year, count));
    }
    log.info(&format!("[INFO] Retrieved a total of {} unique projects", projects.len()));
}
