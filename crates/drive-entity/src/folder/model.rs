//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in an owner's hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name (trimmed, non-empty).
    pub name: String,
    /// Parent folder ID (`None` for top-level folders).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Whether the owner starred the folder.
    pub is_starred: bool,
    /// Whether the folder is in the trash.
    pub is_trashed: bool,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// Parent folder (`None` for root).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
}

impl CreateFolder {
    /// Materialize a row as the store would insert it.
    pub fn into_folder(self, id: Uuid, now: DateTime<Utc>) -> Folder {
        Folder {
            id,
            name: self.name,
            parent_id: self.parent_id,
            owner_id: self.owner_id,
            created_at: now,
            updated_at: now,
            is_starred: false,
            is_trashed: false,
        }
    }
}
