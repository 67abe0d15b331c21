pub mod cms_client_http;
pub mod file_run_log;
pub mod filesystem_tree;

pub use cms_client_http::HttpCmsClient;
pub use file_run_log::{ConsoleRunLog, FileRunLog};
pub use filesystem_tree::FilesystemTree;
