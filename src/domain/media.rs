//! Media upload domain: upload modes, accepted file types and CMS project records.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "tiff"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm"];

const UNKNOWN: &str = "Unknown";

/// Which project media folder gets uploaded, and which CMS field it links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    #[default]
    Gallery,
    Collage,
}

impl UploadMode {
    pub fn folder_suffix(&self) -> &'static str {
        match self {
            UploadMode::Gallery => "_gallery",
            UploadMode::Collage => "_collage",
        }
    }

    pub fn media_field(&self) -> &'static str {
        match self {
            UploadMode::Gallery => "galleryImages",
            UploadMode::Collage => "vineImages",
        }
    }
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMode::Gallery => write!(f, "gallery"),
            UploadMode::Collage => write!(f, "collage"),
        }
    }
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gallery" => Ok(UploadMode::Gallery),
            "collage" => Ok(UploadMode::Collage),
            other => Err(format!("Invalid upload mode '{}': must be gallery or collage", other)),
        }
    }
}

/// Whether `path` has an extension the uploader accepts.
pub fn is_uploadable(path: &Path, include_videos: bool) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
        || (include_videos && VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type sent with a multipart upload.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("tiff" | "tif") => "image/tiff",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

/// A CMS project record reduced to the fields the uploader needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: Option<String>,
    pub date: Option<String>,
    pub published: bool,
}

impl Project {
    /// Parse one entry of a `data` array, accepting flat and `attributes`-nested shapes.
    ///
    /// `id`, `Name` and `Date` must be present; `Name` and `Date` may be null.
    pub fn from_entry(entry: &Value) -> Result<Self, String> {
        let fields = entry.get("attributes").filter(|v| v.is_object()).unwrap_or(entry);

        let id = entry
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| format!("missing or non-numeric id in {}", entry))?;

        let (Some(name), Some(date)) = (fields.get("Name"), fields.get("Date")) else {
            return Err(format!("project {} is missing Name or Date", id));
        };

        let published = ["publishedAt", "published_at"]
            .iter()
            .any(|key| fields.get(*key).is_some_and(|v| !v.is_null()));

        Ok(Self { id, name: scalar_text(name), date: scalar_text(date), published })
    }

    /// Local folder name: `"{Date} {Name}"`, with `Unknown` for missing parts.
    pub fn folder_name(&self) -> String {
        let date = self.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        format!("{} {}", date.unwrap_or(UNKNOWN), name.unwrap_or(UNKNOWN))
    }

    /// Year bucket used in the fetch summary.
    pub fn year(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
