//! In-memory repositories.
//!
//! Both repositories share one [`MemoryStore`] so folder emptiness checks
//! see file rows, and the foreign keys of the SQL schema (non-cascading
//! `folder_id` / `parent_id`) are enforced the same way.

pub mod file;
pub mod folder;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use drive_entity::file::File;
use drive_entity::folder::Folder;

pub use file::MemoryFileRepository;
pub use folder::MemoryFolderRepository;

/// Shared tables for the in-memory repositories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) folders: RwLock<HashMap<Uuid, Folder>>,
    pub(crate) files: RwLock<HashMap<Uuid, File>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Build a file and a folder repository over a fresh store.
    pub fn repositories() -> (MemoryFileRepository, MemoryFolderRepository) {
        let store = Self::new();
        (
            MemoryFileRepository::new(Arc::clone(&store)),
            MemoryFolderRepository::new(store),
        )
    }

    /// Total number of file rows, across all owners.
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }

    /// Total number of folder rows, across all owners.
    pub async fn folder_count(&self) -> usize {
        self.folders.read().await.len()
    }
}

/// Next `updated_at` value. Timestamps strictly advance on every write.
pub(crate) fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::microseconds(1))
}

/// Creation stamp later than every existing row's `updated_at`.
pub(crate) fn next_stamp(existing: impl Iterator<Item = DateTime<Utc>>) -> DateTime<Utc> {
    existing.max().map_or_else(Utc::now, touch)
}

pub(crate) fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> DateTime<Utc>) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}
