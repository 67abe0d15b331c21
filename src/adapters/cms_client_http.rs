//! CMS REST client implementation using reqwest.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, CmsConfig, mime_type_for};
use crate::ports::{CmsClient, MediaLink, Pagination, ProjectPage, ProjectQuery, UploadedMedia};

const DEFAULT_STATUS_MESSAGE: &str = "CMS request failed";

/// HTTP transport for the CMS REST API.
///
/// One request per call; there is no retry layer.
#[derive(Clone)]
pub struct HttpCmsClient {
    base_url: Url,
    token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for HttpCmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCmsClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpCmsClient {
    /// Create a new client for `config.base_url` with an optional bearer token.
    pub fn new(token: Option<String>, config: &CmsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::cms(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self { base_url: config.base_url.clone(), token, client })
    }

    /// Create from the token variable named in `config`.
    pub fn from_env(config: &CmsConfig) -> Result<Self, AppError> {
        Self::new(config.token(), config)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str, preview: bool) -> Result<Url, AppError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, path))
            .map_err(|e| AppError::config_error(format!("Invalid CMS URL: {}", e)))?;
        if preview {
            url.query_pairs_mut().append_pair("publicationState", "preview");
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<(u16, String), AppError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| AppError::cms(format!("HTTP request failed: {}", e), None))?;
        read_success(response)
    }
}

fn read_success(response: Response) -> Result<(u16, String), AppError> {
    let status = response.status();
    let body_text = response.text().unwrap_or_default();

    if status.is_success() {
        return Ok((status.as_u16(), body_text));
    }

    let message = extract_error_message(&body_text).unwrap_or_else(|| {
        if !body_text.trim().is_empty() {
            body_text.trim().to_string()
        } else if status.as_u16() == 413 {
            "Payload too large".to_string()
        } else if status.as_u16() == 429 {
            "Rate limited".to_string()
        } else if status.is_server_error() {
            "Server error".to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    Err(AppError::cms(format!("HTTP {}: {}", status.as_u16(), message), Some(status.as_u16())))
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

#[derive(Debug, Deserialize)]
struct ListMeta {
    #[serde(default)]
    pagination: Option<PaginationBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationBody {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    page_count: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    id: u64,
    #[serde(default)]
    name: Option<String>,
}

impl CmsClient for HttpCmsClient {
    fn fetch_projects(&self, query: &ProjectQuery) -> Result<ProjectPage, AppError> {
        let mut url = self.endpoint("api/projects", false)?;
        url.query_pairs_mut()
            .append_pair("pagination[page]", &query.page.to_string())
            .append_pair("pagination[pageSize]", &query.page_size.to_string())
            .append_pair("sort", "Date:asc");
        if query.preview {
            url.query_pairs_mut().append_pair("publicationState", "preview");
        }

        let (status, body) = self.send(self.client.get(url))?;
        let parsed: ListResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::cms(format!("Failed to parse project list: {}", e), Some(status))
        })?;

        let entries = parsed.data.ok_or_else(|| {
            let keys = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.as_object().map(|o| o.keys().cloned().collect::<Vec<_>>()))
                .unwrap_or_default();
            AppError::cms(
                format!("Unexpected API response structure: [{}]", keys.join(", ")),
                Some(status),
            )
        })?;

        let pagination = parsed.meta.and_then(|m| m.pagination).map(|p| Pagination {
            page: p.page,
            page_size: p.page_size,
            page_count: p.page_count,
            total: p.total,
        });

        Ok(ProjectPage { entries, pagination })
    }

    fn upload_file(&self, path: &Path) -> Result<UploadedMedia, AppError> {
        let url = self.endpoint("api/upload", false)?;
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_type_for(path))
            .map_err(|e| AppError::cms(format!("Invalid MIME type: {}", e), None))?;
        let form = Form::new().part("files", part);

        let (status, body) = self.send(self.client.post(url).multipart(form))?;
        let uploaded: Vec<UploadBody> = serde_json::from_str(&body).map_err(|e| {
            AppError::cms(format!("Failed to parse upload response: {}", e), Some(status))
        })?;

        let first = uploaded
            .into_iter()
            .next()
            .ok_or_else(|| AppError::cms("Upload response contained no media", Some(status)))?;

        Ok(UploadedMedia { id: first.id, name: first.name })
    }

    fn link_media(&self, link: &MediaLink) -> Result<(), AppError> {
        let url = self.endpoint(&format!("api/projects/{}", link.project_id), link.preview)?;
        let mut data = serde_json::Map::new();
        data.insert(link.field.clone(), json!(link.media_ids));
        let body = json!({ "data": data });

        self.send(self.client.put(url).json(&body))?;
        Ok(())
    }
}
