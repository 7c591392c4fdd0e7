//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drive_entity::file::File;
use drive_entity::folder::{Breadcrumb, Folder};
use drive_entity::item::DriveItem;

/// Plain confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A created or renamed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// Message.
    pub message: String,
    /// The file row.
    pub file: File,
}

/// A created or renamed folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Message.
    pub message: String,
    /// The folder row.
    pub folder: Folder,
}

/// File rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesResponse {
    /// Files.
    pub files: Vec<File>,
}

/// Folder rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersResponse {
    /// Folders.
    pub folders: Vec<Folder>,
}

/// Signed download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    /// Signed URL.
    pub download_url: String,
    /// Name to save the content under.
    pub file_name: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Root-first breadcrumb trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadcrumbsResponse {
    /// Trail entries.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// A single updated item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Message.
    pub message: String,
    /// The updated row, tagged with its `type`.
    pub item: DriveItem,
}

/// Outcome of a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Message.
    pub message: String,
    /// Number of rows affected.
    pub count: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Blob store status.
    pub storage: String,
}
