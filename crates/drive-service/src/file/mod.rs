//! File services: metadata operations, upload, and signed download.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadLink, DownloadService, SignedBlob};
pub use service::FileService;
pub use upload::{UploadRequest, UploadService};
