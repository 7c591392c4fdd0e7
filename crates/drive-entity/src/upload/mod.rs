//! Upload progress tracking.

pub mod progress;

pub use progress::{UploadProgress, UploadStatus};
