//! # drive-service
//!
//! Business logic for Cloud Drive. The stateless services enforce the
//! owner-scoped invariants over the row store and the blob store;
//! [`DriveService`] composes them behind one facade, and [`DriveSession`]
//! is the per-user orchestrator that keeps a view of the current folder
//! in sync with the stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod drive;
pub mod file;
pub mod folder;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use drive::{DriveService, DriveSession, DriveState, Listing, Notice, NoticeLevel};
pub use file::{DownloadLink, DownloadService, FileService, UploadRequest, UploadService};
pub use folder::{BreadcrumbService, FolderService, MAX_BREADCRUMB_DEPTH};
