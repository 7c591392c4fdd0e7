//! File upload: blob write, then metadata row, with compensation.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use drive_core::config::StorageConfig;
use drive_core::error::AppError;
use drive_core::traits::storage::StorageProvider;
use drive_database::repositories::{FileRepository, FolderRepository};
use drive_entity::file::{CreateFile, File};
use drive_storage::key::storage_key;
use drive_storage::mime::resolve_mime;

use crate::context::RequestContext;

/// One file to upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type, if any.
    pub mime_type: Option<String>,
    /// File content bytes.
    pub data: Bytes,
    /// Target folder (`None` for the root).
    pub folder_id: Option<Uuid>,
}

impl UploadRequest {
    /// Build a request for the root folder.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            data: data.into(),
            folder_id: None,
        }
    }

    /// Set the declared MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Set the target folder.
    pub fn in_folder(mut self, folder_id: Option<Uuid>) -> Self {
        self.folder_id = folder_id;
        self
    }
}

/// Handles single-request uploads.
#[derive(Clone)]
pub struct UploadService {
    /// File repository.
    file_repo: Arc<dyn FileRepository>,
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Maximum accepted size in bytes.
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("max_upload_size_bytes", &self.max_upload_size_bytes)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    /// Uploads one file.
    ///
    /// A failed blob write creates no row (`Upload`). A failed row insert
    /// deletes the blob again before surfacing `Metadata`; a failure of
    /// that cleanup is only logged.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> Result<File, AppError> {
        if req.data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let file_name = req.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }

        if let Some(folder_id) = req.folder_id {
            self.folder_repo
                .find_owned(ctx.user_id, folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
        }

        let storage_path = storage_key(ctx.user_id, &file_name);
        let mime_type = resolve_mime(req.mime_type.as_deref(), &file_name);
        let size_bytes = req.data.len() as i64;

        if let Err(e) = self.storage.write(&storage_path, req.data).await {
            error!(
                user_id = %ctx.user_id,
                storage_path = %storage_path,
                error = %e,
                "Blob write failed"
            );
            return Err(AppError::upload(format!("Failed to upload file: {}", e.message)));
        }

        let record = CreateFile {
            name: file_name,
            size_bytes,
            mime_type,
            storage_path: storage_path.clone(),
            folder_id: req.folder_id,
            owner_id: ctx.user_id,
        };

        let file = match self.file_repo.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(
                        storage_path = %storage_path,
                        error = %cleanup,
                        "Failed to remove orphaned blob"
                    );
                }
                return Err(AppError::metadata(format!(
                    "Failed to save file metadata: {}",
                    e.message
                )));
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = ?file.folder_id,
            size = file.size_bytes,
            "Upload completed"
        );
        Ok(file)
    }
}
