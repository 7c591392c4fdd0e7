//! Folder CRUD operations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_database::repositories::FolderRepository;
use drive_entity::folder::{CreateFolder, Folder};

use super::breadcrumb::ancestors;
use crate::context::RequestContext;
use crate::file::service::require_ids;

/// Manages folder rows.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
}

fn clean_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name is required"));
    }
    Ok(name)
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<dyn FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Lists non-trashed folders directly under `parent_id`, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.list_children(ctx.user_id, parent_id).await
    }

    /// Lists starred, non-trashed folders.
    pub async fn list_starred(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.list_starred(ctx.user_id).await
    }

    /// Lists trashed folders.
    pub async fn list_trashed(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.list_trashed(ctx.user_id).await
    }

    /// Gets an owned folder.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.folder_repo
            .find_owned(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn ensure_unique_name(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        let existing = self
            .folder_repo
            .find_sibling_by_name(ctx.user_id, parent_id, name, exclude)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("Folder with this name already exists"));
        }
        Ok(())
    }

    /// Creates a new folder.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let name = clean_name(name)?;

        if let Some(parent) = parent_id {
            self.folder_repo
                .find_owned(ctx.user_id, parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        self.ensure_unique_name(ctx, parent_id, name, None).await?;

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames a folder, rejecting a name already used by a sibling.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        let name = clean_name(new_name)?;
        let folder = self.get_folder(ctx, folder_id).await?;

        self.ensure_unique_name(ctx, folder.parent_id, name, Some(folder.id))
            .await?;

        let renamed = self
            .folder_repo
            .rename(ctx.user_id, folder_id, name)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %renamed.id,
            old_name = %folder.name,
            new_name = %renamed.name,
            "Folder renamed"
        );
        Ok(renamed)
    }

    /// Permanently deletes empty folders.
    ///
    /// All-or-nothing: every id must be owned and every folder must have
    /// no children (trashed children included), otherwise nothing is
    /// deleted.
    pub async fn delete(&self, ctx: &RequestContext, ids: &[Uuid]) -> Result<u64, AppError> {
        require_ids(ids)?;
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        let folders = self
            .folder_repo
            .find_many_owned(ctx.user_id, ids)
            .await?;
        if folders.len() != wanted.len() {
            return Err(AppError::not_found("Folder not found"));
        }

        for folder in &folders {
            if self.folder_repo.count_children(ctx.user_id, folder.id).await? > 0 {
                return Err(AppError::not_empty(format!(
                    "Folder '{}' is not empty. Delete all files and subfolders first.",
                    folder.name
                )));
            }
        }

        let owned: Vec<Uuid> = wanted.into_iter().collect();
        let deleted = self.folder_repo.delete_many(ctx.user_id, &owned).await?;
        info!(user_id = %ctx.user_id, count = deleted, "Folders deleted");
        Ok(deleted)
    }

    /// Moves folders into or out of the trash.
    pub async fn set_trashed(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        trashed: bool,
    ) -> Result<u64, AppError> {
        require_ids(ids)?;
        let count = self
            .folder_repo
            .set_trashed(ctx.user_id, ids, trashed)
            .await?;
        info!(user_id = %ctx.user_id, count, trashed, "Folder trash state updated");
        Ok(count)
    }

    /// Flips the starred flag of a folder.
    pub async fn toggle_star(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.folder_repo
            .toggle_star(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Re-parents folders under `target` (`None` for the root).
    ///
    /// The target must be an owned, non-trashed folder and must not be one
    /// of the moved folders or lie beneath one of them.
    pub async fn move_to(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        target: Option<Uuid>,
    ) -> Result<u64, AppError> {
        require_ids(ids)?;

        if let Some(target_id) = target {
            let folder = self.folder_repo.find_owned(ctx.user_id, target_id).await?;
            if !folder.is_some_and(|f| !f.is_trashed) {
                return Err(AppError::not_found("Target folder not found"));
            }
            if ids.contains(&target_id) {
                return Err(AppError::validation("Cannot move a folder into itself"));
            }
            let chain = ancestors(self.folder_repo.as_ref(), ctx.user_id, target_id).await?;
            if chain.iter().any(|f| ids.contains(&f.id)) {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its subfolders",
                ));
            }
        }

        let count = self.folder_repo.move_to(ctx.user_id, ids, target).await?;
        info!(
            user_id = %ctx.user_id,
            folder_id = ?target,
            count,
            "Folders moved"
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use drive_core::error::ErrorKind;
    use drive_entity::item::ItemKind;

    use crate::file::UploadRequest;
    use crate::testing::Harness;

    #[tokio::test]
    async fn test_create_trims_and_lists() {
        let h = Harness::new();
        let folder = h.drive.create_folder(&h.ctx, "  Projects ", None).await.unwrap();
        assert_eq!(folder.name, "Projects");
        assert_eq!(folder.owner_id, h.ctx.user_id);

        let listed = h.drive.list_folders(&h.ctx, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, folder.id);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let h = Harness::new();
        let err = h.drive.create_folder(&h.ctx, "   ", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Folder name is required");
    }

    #[tokio::test]
    async fn test_sibling_names_conflict() {
        let h = Harness::new();
        let parent = h.drive.create_folder(&h.ctx, "Work", None).await.unwrap();
        h.drive
            .create_folder(&h.ctx, "Reports", Some(parent.id))
            .await
            .unwrap();

        let err = h
            .drive
            .create_folder(&h.ctx, "Reports", Some(parent.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        h.drive.create_folder(&h.ctx, "Reports", None).await.unwrap();
        h.drive
            .create_folder(&h.stranger(), "Reports", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_parent_is_not_found() {
        let h = Harness::new();
        let theirs = h.drive.create_folder(&h.stranger(), "Theirs", None).await.unwrap();
        let err = h
            .drive
            .create_folder(&h.ctx, "Mine", Some(theirs.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_rename_checks_siblings_but_not_itself() {
        let h = Harness::new();
        let a = h.drive.create_folder(&h.ctx, "A", None).await.unwrap();
        h.drive.create_folder(&h.ctx, "B", None).await.unwrap();

        let err = h
            .drive
            .rename_item(&h.ctx, a.id, "B", ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let same = h
            .drive
            .rename_item(&h.ctx, a.id, "A", ItemKind::Folder)
            .await
            .unwrap();
        assert_eq!(same.name(), "A");

        let renamed = h
            .drive
            .rename_item(&h.ctx, a.id, "Archive", ItemKind::Folder)
            .await
            .unwrap();
        assert_eq!(renamed.name(), "Archive");
        assert!(renamed.updated_at() > a.updated_at);
    }

    #[tokio::test]
    async fn test_non_empty_folder_cannot_be_deleted() {
        let h = Harness::new();
        let folder = h.drive.create_folder(&h.ctx, "Photos", None).await.unwrap();
        let file = h
            .drive
            .upload(
                &h.ctx,
                UploadRequest::new("cat.png", b"png".to_vec()).in_folder(Some(folder.id)),
            )
            .await
            .unwrap();

        let err = h
            .drive
            .delete_items(&h.ctx, &[folder.id], ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEmpty);
        assert_eq!(h.store.folder_count().await, 1);

        h.drive
            .move_to_trash(&h.ctx, &[file.id], ItemKind::File)
            .await
            .unwrap();
        let err = h
            .drive
            .delete_items(&h.ctx, &[folder.id], ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEmpty);

        h.drive
            .delete_items(&h.ctx, &[file.id], ItemKind::File)
            .await
            .unwrap();
        let deleted = h
            .drive
            .delete_items(&h.ctx, &[folder.id], ItemKind::Folder)
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(h.store.folder_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_is_all_or_nothing() {
        let h = Harness::new();
        let empty = h.drive.create_folder(&h.ctx, "Empty", None).await.unwrap();
        let full = h.drive.create_folder(&h.ctx, "Full", None).await.unwrap();
        h.drive
            .create_folder(&h.ctx, "Child", Some(full.id))
            .await
            .unwrap();

        let err = h
            .drive
            .delete_items(&h.ctx, &[empty.id, full.id], ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEmpty);
        assert_eq!(h.store.folder_count().await, 3);

        let theirs = h.drive.create_folder(&h.stranger(), "Theirs", None).await.unwrap();
        let err = h
            .drive
            .delete_items(&h.ctx, &[empty.id, theirs.id], ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(h.store.folder_count().await, 4);
    }

    #[tokio::test]
    async fn test_move_rejects_cycles() {
        let h = Harness::new();
        let a = h.drive.create_folder(&h.ctx, "A", None).await.unwrap();
        let b = h.drive.create_folder(&h.ctx, "B", Some(a.id)).await.unwrap();
        let c = h.drive.create_folder(&h.ctx, "C", Some(b.id)).await.unwrap();

        let err = h
            .drive
            .move_items(&h.ctx, &[a.id], Some(a.id), ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = h
            .drive
            .move_items(&h.ctx, &[a.id], Some(c.id), ItemKind::Folder)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let moved = h
            .drive
            .move_items(&h.ctx, &[c.id], None, ItemKind::Folder)
            .await
            .unwrap();
        assert_eq!(moved, 1);
        let top = h.drive.list_folders(&h.ctx, None).await.unwrap();
        assert_eq!(top.len(), 2);
    }

    #[tokio::test]
    async fn test_trash_and_restore_folder() {
        let h = Harness::new();
        let folder = h.drive.create_folder(&h.ctx, "Drafts", None).await.unwrap();

        h.drive
            .move_to_trash(&h.ctx, &[folder.id], ItemKind::Folder)
            .await
            .unwrap();
        assert!(h.drive.list_folders(&h.ctx, None).await.unwrap().is_empty());
        let trash = h.drive.list_trashed(&h.ctx).await.unwrap();
        assert_eq!(trash.folders.len(), 1);

        h.drive
            .restore_from_trash(&h.ctx, &[folder.id], ItemKind::Folder)
            .await
            .unwrap();
        assert_eq!(h.drive.list_folders(&h.ctx, None).await.unwrap().len(), 1);
        assert!(h.drive.list_trashed(&h.ctx).await.unwrap().folders.is_empty());
    }
}
