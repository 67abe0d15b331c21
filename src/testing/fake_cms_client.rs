use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::AppError;
use crate::ports::{CmsClient, MediaLink, Pagination, ProjectPage, ProjectQuery, UploadedMedia};

/// CMS double serving canned project pages and recording uploads and links.
#[derive(Clone, Debug, Default)]
pub struct FakeCmsClient {
    pages: Vec<Vec<Value>>,
    paginated: bool,
    fetch_error: Option<(String, u16)>,
    upload_failures: HashMap<String, u16>,
    link_failures: Vec<u64>,
    queries: Arc<Mutex<Vec<ProjectQuery>>>,
    uploads: Arc<Mutex<Vec<PathBuf>>>,
    links: Arc<Mutex<Vec<MediaLink>>>,
}

impl FakeCmsClient {
    /// Serve `pages` with pagination metadata (`pageCount = pages.len()`).
    pub fn with_pages(pages: Vec<Vec<Value>>) -> Self {
        Self { pages, paginated: true, ..Self::default() }
    }

    /// Serve a single page without any pagination metadata.
    pub fn unpaginated(entries: Vec<Value>) -> Self {
        Self { pages: vec![entries], paginated: false, ..Self::default() }
    }

    pub fn failing_fetch(status: u16, message: &str) -> Self {
        Self { fetch_error: Some((message.to_string(), status)), ..Self::default() }
    }

    /// Fail uploads of `file_name` with the given HTTP status.
    pub fn fail_upload(mut self, file_name: &str, status: u16) -> Self {
        self.upload_failures.insert(file_name.to_string(), status);
        self
    }

    pub fn fail_link(mut self, project_id: u64) -> Self {
        self.link_failures.push(project_id);
        self
    }

    pub fn queries(&self) -> Vec<ProjectQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn links(&self) -> Vec<MediaLink> {
        self.links.lock().unwrap().clone()
    }
}

impl CmsClient for FakeCmsClient {
    fn fetch_projects(&self, query: &ProjectQuery) -> Result<ProjectPage, AppError> {
        self.queries.lock().unwrap().push(*query);
        if let Some((message, status)) = &self.fetch_error {
            return Err(AppError::cms(message.clone(), Some(*status)));
        }

        let index = query.page.saturating_sub(1) as usize;
        let entries = self.pages.get(index).cloned().unwrap_or_default();
        let pagination = self.paginated.then(|| Pagination {
            page: Some(query.page),
            page_size: Some(query.page_size),
            page_count: Some(self.pages.len() as u32),
            total: Some(self.pages.iter().map(Vec::len).sum::<usize>() as u64),
        });
        Ok(ProjectPage { entries, pagination })
    }

    fn upload_file(&self, path: &Path) -> Result<UploadedMedia, AppError> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if let Some(status) = self.upload_failures.get(&name) {
            return Err(AppError::cms(format!("HTTP {}: upload rejected", status), Some(*status)));
        }

        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(path.to_path_buf());
        Ok(UploadedMedia { id: 100 + uploads.len() as u64, name: Some(name) })
    }

    fn link_media(&self, link: &MediaLink) -> Result<(), AppError> {
        if self.link_failures.contains(&link.project_id) {
            return Err(AppError::cms("HTTP 400: link rejected", Some(400)));
        }
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }
}
