//! # drive-entity
//!
//! Domain entity models for Cloud Drive. Row types (`File`, `Folder`)
//! derive `sqlx::FromRow`; the rest are value objects shared by the
//! service layer, the drive session, and the REST facade.

pub mod file;
pub mod folder;
pub mod item;
pub mod upload;
pub mod view;

pub use file::{CreateFile, File};
pub use folder::{Breadcrumb, CreateFolder, Folder};
pub use item::{DriveItem, ItemKind};
pub use upload::{UploadProgress, UploadStatus};
pub use view::{SortBy, ViewMode};
