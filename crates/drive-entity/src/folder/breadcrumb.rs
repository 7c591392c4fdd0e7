//! Breadcrumb path entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Folder;

/// Display name of the root entry.
pub const ROOT_FOLDER_NAME: &str = "My Drive";

/// One entry of a root-first breadcrumb path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID, `None` for the root.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
}

impl Breadcrumb {
    /// The root entry.
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_FOLDER_NAME.to_string(),
        }
    }
}

impl From<&Folder> for Breadcrumb {
    fn from(folder: &Folder) -> Self {
        Self {
            id: Some(folder.id),
            name: folder.name.clone(),
        }
    }
}
