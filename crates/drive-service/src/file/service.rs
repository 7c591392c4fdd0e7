//! File metadata operations.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::traits::storage::StorageProvider;
use drive_database::repositories::{FileRepository, FolderRepository};
use drive_entity::file::File;

use crate::context::RequestContext;

/// Owner-scoped operations on file rows.
#[derive(Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<dyn FileRepository>,
    /// Folder repository, for move targets.
    folder_repo: Arc<dyn FolderRepository>,
    /// Blob storage, for permanent deletes.
    storage: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

/// Reject an empty batch.
pub(crate) fn require_ids(ids: &[Uuid]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::validation("No items selected"));
    }
    Ok(())
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
        }
    }

    /// Lists non-trashed files directly under `folder_id`, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<File>, AppError> {
        self.file_repo.list_in_folder(ctx.user_id, folder_id).await
    }

    /// Lists starred, non-trashed files.
    pub async fn list_starred(&self, ctx: &RequestContext) -> Result<Vec<File>, AppError> {
        self.file_repo.list_starred(ctx.user_id).await
    }

    /// Lists trashed files.
    pub async fn list_trashed(&self, ctx: &RequestContext) -> Result<Vec<File>, AppError> {
        self.file_repo.list_trashed(ctx.user_id).await
    }

    /// Lists the most recently updated non-trashed files.
    pub async fn list_recent(
        &self,
        ctx: &RequestContext,
        limit: u32,
    ) -> Result<Vec<File>, AppError> {
        self.file_repo.list_recent(ctx.user_id, limit).await
    }

    /// Renames a file. Duplicate names are allowed for files.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> Result<File, AppError> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }

        let file = self
            .file_repo
            .rename(ctx.user_id, file_id, name)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(user_id = %ctx.user_id, file_id = %file.id, name = %file.name, "File renamed");
        Ok(file)
    }

    /// Permanently deletes files and their blobs.
    ///
    /// Blob deletion failures are logged and do not stop the row delete.
    /// Returns the number of rows removed.
    pub async fn delete(&self, ctx: &RequestContext, ids: &[Uuid]) -> Result<u64, AppError> {
        require_ids(ids)?;
        let files = self.file_repo.find_many_owned(ctx.user_id, ids).await?;
        if files.is_empty() {
            return Ok(0);
        }

        for file in &files {
            if let Err(e) = self.storage.delete(&file.storage_path).await {
                warn!(
                    file_id = %file.id,
                    storage_path = %file.storage_path,
                    error = %e,
                    "Failed to delete blob, removing row anyway"
                );
            }
        }

        let owned: Vec<Uuid> = files.iter().map(|f| f.id).collect();
        let deleted = self.file_repo.delete_many(ctx.user_id, &owned).await?;

        info!(user_id = %ctx.user_id, count = deleted, "Files deleted");
        Ok(deleted)
    }

    /// Moves files into or out of the trash.
    pub async fn set_trashed(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        trashed: bool,
    ) -> Result<u64, AppError> {
        require_ids(ids)?;
        let count = self.file_repo.set_trashed(ctx.user_id, ids, trashed).await?;
        info!(user_id = %ctx.user_id, count, trashed, "File trash state updated");
        Ok(count)
    }

    /// Flips the starred flag of a file.
    pub async fn toggle_star(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        self.file_repo
            .toggle_star(ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Moves files under `target` (`None` for the root).
    ///
    /// The target must be an owned, non-trashed folder. Destination name
    /// collisions are not checked.
    pub async fn move_to(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        target: Option<Uuid>,
    ) -> Result<u64, AppError> {
        require_ids(ids)?;
        if let Some(folder_id) = target {
            let folder = self.folder_repo.find_owned(ctx.user_id, folder_id).await?;
            if !folder.is_some_and(|f| !f.is_trashed) {
                return Err(AppError::not_found("Target folder not found"));
            }
        }

        let count = self.file_repo.move_to(ctx.user_id, ids, target).await?;
        info!(
            user_id = %ctx.user_id,
            folder_id = ?target,
            count,
            "Files moved"
        );
        Ok(count)
    }
}
