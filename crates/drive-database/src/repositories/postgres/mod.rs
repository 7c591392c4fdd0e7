//! PostgreSQL repositories.

pub mod file;
pub mod folder;

pub use file::PgFileRepository;
pub use folder::PgFolderRepository;
