mod cms_client;
mod directory_tree;
mod run_log;

pub use cms_client::{CmsClient, MediaLink, Pagination, ProjectPage, ProjectQuery, UploadedMedia};
pub use directory_tree::{DirectoryListing, DirectoryTree, MediaStore};
pub use run_log::{LogLevel, RunLog};
