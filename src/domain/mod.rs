pub mod apostrophe;
pub mod configuration;
pub mod error;
pub mod ledger;
pub mod media;
pub mod metadata;
pub mod similarity;

pub use apostrophe::{
    PLAIN_MARK, TYPOGRAPHIC_MARK, is_year_prefixed, is_year_prefixed_name, needs_standardization,
    standardize, standardized_name,
};
pub use configuration::{
    CONFIG_FILE, CmsConfig, CollageConfig, FolioConfig, LoggingConfig, NormalizeConfig,
    UploadConfig, load_config,
};
pub use error::AppError;
pub use ledger::{DirectoryOutcome, ErroredEntry, OperationLedger, RenameError, RenamedEntry};
pub use media::{Project, UploadMode, is_uploadable, mime_type_for};
pub use metadata::MetadataSnapshot;
