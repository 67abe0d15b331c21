pub mod loader;
pub mod settings;

pub use loader::{CONFIG_FILE, load_config, parse_config_content};
pub use settings::{
    CmsConfig, CollageConfig, FolioConfig, LoggingConfig, NormalizeConfig, UploadConfig,
};
