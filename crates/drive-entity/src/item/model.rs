//! Item models shared by bulk operations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use drive_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;

/// Which table a bulk operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A row of the `files` table.
    File,
    /// A row of the `folders` table.
    Folder,
}

impl ItemKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(AppError::validation(format!(
                "Unknown item type '{other}', expected 'file' or 'folder'"
            ))),
        }
    }
}

/// Either a file or a folder row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DriveItem {
    /// A file row.
    File(File),
    /// A folder row.
    Folder(Folder),
}

impl DriveItem {
    /// Row ID.
    pub fn id(&self) -> Uuid {
        match self {
            Self::File(f) => f.id,
            Self::Folder(f) => f.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }

    /// Item kind.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::File(_) => ItemKind::File,
            Self::Folder(_) => ItemKind::Folder,
        }
    }

    /// Last update time.
    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::File(f) => f.updated_at,
            Self::Folder(f) => f.updated_at,
        }
    }

    /// Size in bytes; folders report zero.
    pub fn size_bytes(&self) -> i64 {
        match self {
            Self::File(f) => f.size_bytes,
            Self::Folder(_) => 0,
        }
    }

    /// Whether the item is starred.
    pub fn is_starred(&self) -> bool {
        match self {
            Self::File(f) => f.is_starred,
            Self::Folder(f) => f.is_starred,
        }
    }
}

impl From<File> for DriveItem {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for DriveItem {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}
