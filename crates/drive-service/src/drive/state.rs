//! State owned by a drive session.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::types::SortDirection;
use drive_entity::file::File;
use drive_entity::folder::{Breadcrumb, Folder};
use drive_entity::item::DriveItem;
use drive_entity::upload::UploadProgress;
use drive_entity::view::{SortBy, ViewMode};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// A transient message for the user, drained with `take_notices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// View of the current folder plus UI settings.
#[derive(Debug, Clone)]
pub struct DriveState {
    /// Non-trashed files of the current folder.
    pub files: Vec<File>,
    /// Non-trashed subfolders of the current folder.
    pub folders: Vec<Folder>,
    /// Current folder (`None` for the root).
    pub current_folder_id: Option<Uuid>,
    /// Root-first path to the current folder.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Selected item IDs.
    pub selected_items: BTreeSet<Uuid>,
    /// Grid or list layout.
    pub view_mode: ViewMode,
    /// Sort field.
    pub sort_by: SortBy,
    /// Sort direction.
    pub sort_order: SortDirection,
    /// Case-insensitive name filter; empty shows everything.
    pub search_query: String,
    /// One entry per file of every upload batch, oldest first.
    pub upload_progress: Vec<UploadProgress>,
    /// Whether an operation is in flight.
    pub loading: bool,
    /// Last failure, cleared when the next operation starts.
    pub error: Option<AppError>,
}

impl Default for DriveState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            folders: Vec::new(),
            current_folder_id: None,
            breadcrumbs: vec![Breadcrumb::root()],
            selected_items: BTreeSet::new(),
            view_mode: ViewMode::default(),
            sort_by: SortBy::default(),
            sort_order: SortDirection::default(),
            search_query: String::new(),
            upload_progress: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl DriveState {
    /// Folders then files, filtered by the search query and sorted.
    pub fn visible_items(&self) -> Vec<DriveItem> {
        let query = self.search_query.trim().to_lowercase();
        let matches = |name: &str| query.is_empty() || name.to_lowercase().contains(&query);

        let mut folders: Vec<DriveItem> = self
            .folders
            .iter()
            .filter(|f| matches(&f.name))
            .cloned()
            .map(DriveItem::from)
            .collect();
        let mut files: Vec<DriveItem> = self
            .files
            .iter()
            .filter(|f| matches(&f.name))
            .cloned()
            .map(DriveItem::from)
            .collect();

        folders.sort_by(|a, b| self.sort_order.apply(compare(self.sort_by, a, b)));
        files.sort_by(|a, b| self.sort_order.apply(compare(self.sort_by, a, b)));
        folders.extend(files);
        folders
    }

    /// IDs of every item in the current folder.
    pub fn all_item_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.folders
            .iter()
            .map(|f| f.id)
            .chain(self.files.iter().map(|f| f.id))
    }
}

fn by_name(a: &DriveItem, b: &DriveItem) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}

fn compare(sort_by: SortBy, a: &DriveItem, b: &DriveItem) -> Ordering {
    match sort_by {
        SortBy::Name => by_name(a, b),
        SortBy::Modified => a.updated_at().cmp(&b.updated_at()),
        SortBy::Size => a.size_bytes().cmp(&b.size_bytes()),
        SortBy::Type => type_key(a).cmp(type_key(b)),
    }
    .then_with(|| by_name(a, b))
}

fn type_key(item: &DriveItem) -> &str {
    match item {
        DriveItem::File(f) => &f.mime_type,
        DriveItem::Folder(_) => "",
    }
}
