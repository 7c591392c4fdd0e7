//! In-memory file repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::file::{CreateFile, File};

use super::{MemoryStore, newest_first, next_stamp, touch};
use crate::repositories::FileRepository;

/// File rows held in process memory.
#[derive(Debug, Clone)]
pub struct MemoryFileRepository {
    store: Arc<MemoryStore>,
}

impl MemoryFileRepository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    async fn collect(&self, predicate: impl Fn(&File) -> bool) -> Vec<File> {
        self.store
            .files
            .read()
            .await
            .values()
            .filter(|f| predicate(f))
            .cloned()
            .collect()
    }

    async fn update_each(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        apply: impl Fn(&mut File),
    ) -> u64 {
        let mut files = self.store.files.write().await;
        let mut affected = 0;
        for id in ids {
            if let Some(file) = files.get_mut(id).filter(|f| f.owner_id == owner_id) {
                apply(file);
                file.updated_at = touch(file.updated_at);
                affected += 1;
            }
        }
        affected
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        let files = self.store.files.read().await;
        Ok(files.get(&id).filter(|f| f.owner_id == owner_id).cloned())
    }

    async fn find_many_owned(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<File>> {
        Ok(self
            .collect(|f| f.owner_id == owner_id && ids.contains(&f.id))
            .await)
    }

    async fn list_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.folder_id == folder_id && !f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.created_at);
        Ok(rows)
    }

    async fn list_starred(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.is_starred && !f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.created_at);
        Ok(rows)
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.updated_at);
        Ok(rows)
    }

    async fn list_recent(&self, owner_id: Uuid, limit: u32) -> AppResult<Vec<File>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && !f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.updated_at);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let folders = self.store.folders.read().await;
        if let Some(folder_id) = data.folder_id {
            if !folders.contains_key(&folder_id) {
                return Err(AppError::database(format!(
                    "Folder {folder_id} referenced by file does not exist"
                )));
            }
        }

        let mut files = self.store.files.write().await;
        if files.values().any(|f| f.storage_path == data.storage_path) {
            return Err(AppError::database(format!(
                "Storage path '{}' is already in use",
                data.storage_path
            )));
        }

        let stamp = next_stamp(files.values().map(|r| r.updated_at));
        let file = data.clone().into_file(Uuid::new_v4(), stamp);
        files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<Option<File>> {
        let mut files = self.store.files.write().await;
        Ok(files
            .get_mut(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|file| {
                file.name = name.to_string();
                file.updated_at = touch(file.updated_at);
                file.clone()
            }))
    }

    async fn set_trashed(&self, owner_id: Uuid, ids: &[Uuid], trashed: bool) -> AppResult<u64> {
        Ok(self
            .update_each(owner_id, ids, |f| f.is_trashed = trashed)
            .await)
    }

    async fn toggle_star(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        let mut files = self.store.files.write().await;
        Ok(files
            .get_mut(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|file| {
                file.is_starred = !file.is_starred;
                file.clone()
            }))
    }

    async fn move_to(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        folder_id: Option<Uuid>,
    ) -> AppResult<u64> {
        if let Some(target) = folder_id {
            if !self.store.folders.read().await.contains_key(&target) {
                return Err(AppError::database(format!(
                    "Folder {target} referenced by file does not exist"
                )));
            }
        }
        Ok(self
            .update_each(owner_id, ids, |f| f.folder_id = folder_id)
            .await)
    }

    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<u64> {
        let mut files = self.store.files.write().await;
        let before = files.len();
        files.retain(|id, f| !(f.owner_id == owner_id && ids.contains(id)));
        Ok((before - files.len()) as u64)
    }
}
