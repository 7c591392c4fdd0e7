//! Stateless, owner-scoped drive operations.
//!
//! Every error leaving this facade belongs to the user-facing taxonomy;
//! infrastructure failures are folded into `Fetch`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drive_core::config::StorageConfig;
use drive_core::error::AppError;
use drive_core::traits::storage::StorageProvider;
use drive_database::repositories::{FileRepository, FolderRepository};
use drive_entity::file::File;
use drive_entity::folder::{Breadcrumb, Folder};
use drive_entity::item::{DriveItem, ItemKind};
use drive_storage::signer::UrlSigner;

use crate::context::RequestContext;
use crate::file::{
    DownloadLink, DownloadService, FileService, SignedBlob, UploadRequest, UploadService,
};
use crate::folder::{BreadcrumbService, FolderService};

/// Default number of entries in the recent view.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Files and folders of one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// File rows.
    pub files: Vec<File>,
    /// Folder rows.
    pub folders: Vec<Folder>,
}

/// Facade over the file, folder, upload, download, and breadcrumb services.
#[derive(Debug, Clone)]
pub struct DriveService {
    files: FileService,
    folders: FolderService,
    uploads: UploadService,
    downloads: DownloadService,
    breadcrumbs: BreadcrumbService,
    storage: Arc<dyn StorageProvider>,
}

impl DriveService {
    /// Wires the services over the given stores.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        signer: UrlSigner,
        config: &StorageConfig,
    ) -> Self {
        Self {
            files: FileService::new(
                Arc::clone(&file_repo),
                Arc::clone(&folder_repo),
                Arc::clone(&storage),
            ),
            folders: FolderService::new(Arc::clone(&folder_repo)),
            uploads: UploadService::new(
                Arc::clone(&file_repo),
                Arc::clone(&folder_repo),
                Arc::clone(&storage),
                config,
            ),
            downloads: DownloadService::new(
                file_repo,
                Arc::clone(&storage),
                signer,
                config.signed_url_ttl_seconds,
            ),
            breadcrumbs: BreadcrumbService::new(folder_repo),
            storage,
        }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.uploads.max_upload_size_bytes()
    }

    /// Whether the blob store answers.
    pub async fn storage_healthy(&self) -> bool {
        self.storage.health_check().await.unwrap_or(false)
    }

    /// Non-trashed children of `folder_id`, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Listing, AppError> {
        let files = self
            .files
            .list(ctx, folder_id)
            .await
            .map_err(AppError::into_fetch)?;
        let folders = self
            .folders
            .list(ctx, folder_id)
            .await
            .map_err(AppError::into_fetch)?;
        Ok(Listing { files, folders })
    }

    /// An owned folder, trashed or not.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.folders
            .get_folder(ctx, folder_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Non-trashed files directly under `folder_id`.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<File>, AppError> {
        self.files
            .list(ctx, folder_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Non-trashed folders directly under `parent_id`.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Folder>, AppError> {
        self.folders
            .list(ctx, parent_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Starred, non-trashed items.
    pub async fn list_starred(&self, ctx: &RequestContext) -> Result<Listing, AppError> {
        let files = self
            .files
            .list_starred(ctx)
            .await
            .map_err(AppError::into_fetch)?;
        let folders = self
            .folders
            .list_starred(ctx)
            .await
            .map_err(AppError::into_fetch)?;
        Ok(Listing { files, folders })
    }

    /// Trashed items.
    pub async fn list_trashed(&self, ctx: &RequestContext) -> Result<Listing, AppError> {
        let files = self
            .files
            .list_trashed(ctx)
            .await
            .map_err(AppError::into_fetch)?;
        let folders = self
            .folders
            .list_trashed(ctx)
            .await
            .map_err(AppError::into_fetch)?;
        Ok(Listing { files, folders })
    }

    /// Most recently updated non-trashed files.
    pub async fn list_recent(
        &self,
        ctx: &RequestContext,
        limit: Option<u32>,
    ) -> Result<Vec<File>, AppError> {
        self.files
            .list_recent(ctx, limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .await
            .map_err(AppError::into_fetch)
    }

    /// Uploads one file.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> Result<File, AppError> {
        self.uploads
            .upload(ctx, req)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Creates a folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        self.folders
            .create(ctx, name, parent_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Renames a file or a folder.
    pub async fn rename_item(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_name: &str,
        kind: ItemKind,
    ) -> Result<DriveItem, AppError> {
        let item = match kind {
            ItemKind::File => self.files.rename(ctx, id, new_name).await.map(DriveItem::from),
            ItemKind::Folder => self
                .folders
                .rename(ctx, id, new_name)
                .await
                .map(DriveItem::from),
        };
        item.map_err(AppError::into_fetch)
    }

    /// Permanently deletes items. Returns the number of rows removed.
    pub async fn delete_items(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        match kind {
            ItemKind::File => self.files.delete(ctx, ids).await,
            ItemKind::Folder => self.folders.delete(ctx, ids).await,
        }
        .map_err(AppError::into_fetch)
    }

    /// Marks items as trashed.
    pub async fn move_to_trash(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        self.set_trashed(ctx, ids, kind, true).await
    }

    /// Clears the trashed mark.
    pub async fn restore_from_trash(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        self.set_trashed(ctx, ids, kind, false).await
    }

    async fn set_trashed(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        kind: ItemKind,
        trashed: bool,
    ) -> Result<u64, AppError> {
        match kind {
            ItemKind::File => self.files.set_trashed(ctx, ids, trashed).await,
            ItemKind::Folder => self.folders.set_trashed(ctx, ids, trashed).await,
        }
        .map_err(AppError::into_fetch)
    }

    /// Flips the starred flag and returns the updated row.
    pub async fn toggle_star(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        kind: ItemKind,
    ) -> Result<DriveItem, AppError> {
        let item = match kind {
            ItemKind::File => self.files.toggle_star(ctx, id).await.map(DriveItem::from),
            ItemKind::Folder => self.folders.toggle_star(ctx, id).await.map(DriveItem::from),
        };
        item.map_err(AppError::into_fetch)
    }

    /// Re-parents items under `target` (`None` for the root).
    pub async fn move_items(
        &self,
        ctx: &RequestContext,
        ids: &[Uuid],
        target: Option<Uuid>,
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        match kind {
            ItemKind::File => self.files.move_to(ctx, ids, target).await,
            ItemKind::Folder => self.folders.move_to(ctx, ids, target).await,
        }
        .map_err(AppError::into_fetch)
    }

    /// Issues a signed download link for an owned file.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DownloadLink, AppError> {
        self.downloads
            .download(ctx, file_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Root-first breadcrumb trail for `folder_id`.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        self.breadcrumbs
            .breadcrumbs(ctx, folder_id)
            .await
            .map_err(AppError::into_fetch)
    }

    /// Opens blob content addressed by a signed URL.
    pub async fn open_signed_blob(
        &self,
        storage_path: &str,
        token: &str,
    ) -> Result<SignedBlob, AppError> {
        self.downloads
            .open_signed(storage_path, token)
            .await
            .map_err(AppError::into_fetch)
    }
}
