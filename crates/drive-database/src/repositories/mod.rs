//! Owner-scoped repositories for the `files` and `folders` tables.
//!
//! Every method takes the caller's `owner_id` and never touches rows that
//! belong to someone else. "Missing" and "not owned" are indistinguishable
//! to callers.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use drive_core::result::AppResult;
use drive_entity::file::{CreateFile, File};
use drive_entity::folder::{CreateFolder, Folder};

pub use memory::{MemoryFileRepository, MemoryFolderRepository, MemoryStore};
pub use postgres::{PgFileRepository, PgFolderRepository};

/// Row store for file metadata.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an owned file by ID, trashed or not.
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>>;

    /// Find the owned subset of the given IDs.
    async fn find_many_owned(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<File>>;

    /// Non-trashed files directly under `folder_id`, newest first.
    async fn list_in_folder(&self, owner_id: Uuid, folder_id: Option<Uuid>)
    -> AppResult<Vec<File>>;

    /// Starred, non-trashed files, newest first.
    async fn list_starred(&self, owner_id: Uuid) -> AppResult<Vec<File>>;

    /// Trashed files, most recently trashed first.
    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>>;

    /// Non-trashed files ordered by `updated_at` descending.
    async fn list_recent(&self, owner_id: Uuid, limit: u32) -> AppResult<Vec<File>>;

    /// Insert a new row.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Set `name` and bump `updated_at`.
    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<Option<File>>;

    /// Set `is_trashed` on the owned rows; returns the number affected.
    async fn set_trashed(&self, owner_id: Uuid, ids: &[Uuid], trashed: bool) -> AppResult<u64>;

    /// Flip `is_starred` in a single conditional update.
    async fn toggle_star(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>>;

    /// Re-parent the owned rows; returns the number affected.
    async fn move_to(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        folder_id: Option<Uuid>,
    ) -> AppResult<u64>;

    /// Delete the owned rows; returns the number affected.
    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<u64>;
}

/// Row store for folders.
#[async_trait]
pub trait FolderRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an owned folder by ID, trashed or not.
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find the owned subset of the given IDs.
    async fn find_many_owned(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<Folder>>;

    /// Non-trashed folders directly under `parent_id`, newest first.
    async fn list_children(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>>;

    /// Starred, non-trashed folders, newest first.
    async fn list_starred(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Trashed folders, most recently trashed first.
    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Non-trashed sibling with exactly `name`, ignoring `exclude`.
    async fn find_sibling_by_name(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<Folder>>;

    /// Number of direct children (files plus folders, trashed included).
    async fn count_children(&self, owner_id: Uuid, id: Uuid) -> AppResult<u64>;

    /// Insert a new row.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Set `name` and bump `updated_at`.
    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<Option<Folder>>;

    /// Set `is_trashed` on the owned rows; returns the number affected.
    async fn set_trashed(&self, owner_id: Uuid, ids: &[Uuid], trashed: bool) -> AppResult<u64>;

    /// Flip `is_starred` in a single conditional update.
    async fn toggle_star(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>>;

    /// Re-parent the owned rows; returns the number affected.
    async fn move_to(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        parent_id: Option<Uuid>,
    ) -> AppResult<u64>;

    /// Delete the owned rows; returns the number affected.
    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<u64>;
}
