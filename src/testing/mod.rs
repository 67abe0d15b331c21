mod fake_cms_client;
mod memory_tree;
mod recording_log;

pub use fake_cms_client::FakeCmsClient;
pub use memory_tree::MemoryTree;
pub use recording_log::RecordingLog;
