//! Folder services: CRUD with sibling-name checks, and breadcrumbs.

pub mod breadcrumb;
pub mod service;

pub use breadcrumb::{BreadcrumbService, MAX_BREADCRUMB_DEPTH};
pub use service::FolderService;
