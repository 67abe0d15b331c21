//! CMS client port definition.

use std::path::Path;

use serde_json::Value;

use crate::domain::AppError;

/// One page request against the projects collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectQuery {
    pub page: u32,
    pub page_size: u32,
    /// Include drafts (`publicationState=preview`).
    pub preview: bool,
}

/// Raw project entries plus whatever pagination metadata the server sent.
#[derive(Debug, Clone, Default)]
pub struct ProjectPage {
    pub entries: Vec<Value>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub page_count: Option<u32>,
    pub total: Option<u64>,
}

/// Media record returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub id: u64,
    pub name: Option<String>,
}

/// Replace a project's media field with the given media ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
    pub project_id: u64,
    pub field: String,
    pub media_ids: Vec<u64>,
    pub preview: bool,
}

/// Port for CMS operations.
pub trait CmsClient {
    fn fetch_projects(&self, query: &ProjectQuery) -> Result<ProjectPage, AppError>;

    fn upload_file(&self, path: &Path) -> Result<UploadedMedia, AppError>;

    fn link_media(&self, link: &MediaLink) -> Result<(), AppError>;
}
