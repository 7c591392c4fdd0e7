//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name, including extension.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type of the content.
    pub mime_type: String,
    /// Storage key of the blob. Unique and never reused.
    pub storage_path: String,
    /// Containing folder (`None` for the root).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
    /// Whether the owner starred the file.
    pub is_starred: bool,
    /// Whether the file is in the trash.
    pub is_trashed: bool,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// The storage key the blob was written to.
    pub storage_path: String,
    /// The folder to place the file in.
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
}

impl CreateFile {
    /// Materialize a row as the store would insert it.
    pub fn into_file(self, id: Uuid, now: DateTime<Utc>) -> File {
        File {
            id,
            name: self.name,
            size_bytes: self.size_bytes,
            mime_type: self.mime_type,
            storage_path: self.storage_path,
            folder_id: self.folder_id,
            owner_id: self.owner_id,
            created_at: now,
            updated_at: now,
            is_starred: false,
            is_trashed: false,
        }
    }
}
