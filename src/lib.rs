//! folio: tidy project folder names, place collages and publish project media to a CMS.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    CollageOptions, CollageOutcome, NormalizeOptions, NormalizeOutcome, PlacedCollage,
    UploadOptions, UploadOutcome, Validation, normalize, place_collages, upload_media,
};
pub use domain::{AppError, FolioConfig, UploadMode, load_config};
