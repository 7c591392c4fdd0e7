//! # drive-database
//!
//! PostgreSQL connection management, migrations, and the owner-scoped
//! repositories for files and folders. In-memory repositories with the
//! same semantics back tests and the memory deployment profile.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, FolderRepository};
