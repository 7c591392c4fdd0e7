//! Request DTOs with validation. Bodies and query strings are camelCase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use drive_entity::item::ItemKind;

use crate::extractors::blank_as_root;

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
    /// Parent folder ID (`None` for the root).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Rename request for files and folders.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
}

/// Star toggle request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StarRequest {
    /// Item ID.
    pub id: Uuid,
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Trash or restore request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchRequest {
    /// Item IDs.
    #[validate(length(min = 1, message = "No items selected"))]
    pub ids: Vec<Uuid>,
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Move request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Item IDs.
    #[validate(length(min = 1, message = "No items selected"))]
    pub ids: Vec<Uuid>,
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Destination folder (`None` for the root).
    #[serde(default)]
    pub target_folder_id: Option<Uuid>,
}

/// `?folderId=` filter for file listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderQuery {
    /// Containing folder (`None` or blank for the root).
    #[serde(default, deserialize_with = "blank_as_root")]
    pub folder_id: Option<Uuid>,
}

/// `?parentId=` filter for folder listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentQuery {
    /// Parent folder (`None` or blank for the root).
    #[serde(default, deserialize_with = "blank_as_root")]
    pub parent_id: Option<Uuid>,
}

/// `?limit=` for the recent view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of files.
    pub limit: Option<u32>,
}

/// `?token=` of a signed blob URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlobQuery {
    /// Signed capability token.
    #[serde(default)]
    pub token: String,
}
