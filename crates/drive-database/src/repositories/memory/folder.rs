//! In-memory folder repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::folder::{CreateFolder, Folder};

use super::{MemoryStore, newest_first, next_stamp, touch};
use crate::repositories::FolderRepository;

/// Folder rows held in process memory.
#[derive(Debug, Clone)]
pub struct MemoryFolderRepository {
    store: Arc<MemoryStore>,
}

impl MemoryFolderRepository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    async fn collect(&self, predicate: impl Fn(&Folder) -> bool) -> Vec<Folder> {
        self.store
            .folders
            .read()
            .await
            .values()
            .filter(|f| predicate(f))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        let folders = self.store.folders.read().await;
        Ok(folders.get(&id).filter(|f| f.owner_id == owner_id).cloned())
    }

    async fn find_many_owned(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        Ok(self
            .collect(|f| f.owner_id == owner_id && ids.contains(&f.id))
            .await)
    }

    async fn list_children(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.parent_id == parent_id && !f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.created_at);
        Ok(rows)
    }

    async fn list_starred(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.is_starred && !f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.created_at);
        Ok(rows)
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut rows = self
            .collect(|f| f.owner_id == owner_id && f.is_trashed)
            .await;
        newest_first(&mut rows, |f| f.updated_at);
        Ok(rows)
    }

    async fn find_sibling_by_name(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<Folder>> {
        let folders = self.store.folders.read().await;
        Ok(folders
            .values()
            .find(|f| {
                f.owner_id == owner_id
                    && f.parent_id == parent_id
                    && f.name == name
                    && !f.is_trashed
                    && Some(f.id) != exclude
            })
            .cloned())
    }

    async fn count_children(&self, owner_id: Uuid, id: Uuid) -> AppResult<u64> {
        let folders = self.store.folders.read().await;
        let files = self.store.files.read().await;
        let sub = folders
            .values()
            .filter(|f| f.owner_id == owner_id && f.parent_id == Some(id))
            .count();
        let contained = files
            .values()
            .filter(|f| f.owner_id == owner_id && f.folder_id == Some(id))
            .count();
        Ok((sub + contained) as u64)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut folders = self.store.folders.write().await;
        if let Some(parent_id) = data.parent_id {
            if !folders.contains_key(&parent_id) {
                return Err(AppError::database(format!(
                    "Parent folder {parent_id} does not exist"
                )));
            }
        }

        let stamp = next_stamp(folders.values().map(|r| r.updated_at));
        let folder = data.clone().into_folder(Uuid::new_v4(), stamp);
        folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        let mut folders = self.store.folders.write().await;
        Ok(folders
            .get_mut(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|folder| {
                folder.name = name.to_string();
                folder.updated_at = touch(folder.updated_at);
                folder.clone()
            }))
    }

    async fn set_trashed(&self, owner_id: Uuid, ids: &[Uuid], trashed: bool) -> AppResult<u64> {
        let mut folders = self.store.folders.write().await;
        let mut affected = 0;
        for id in ids {
            if let Some(folder) = folders.get_mut(id).filter(|f| f.owner_id == owner_id) {
                folder.is_trashed = trashed;
                folder.updated_at = touch(folder.updated_at);
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn toggle_star(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        let mut folders = self.store.folders.write().await;
        Ok(folders
            .get_mut(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|folder| {
                folder.is_starred = !folder.is_starred;
                folder.clone()
            }))
    }

    async fn move_to(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        parent_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut folders = self.store.folders.write().await;
        if let Some(target) = parent_id {
            if !folders.contains_key(&target) {
                return Err(AppError::database(format!(
                    "Parent folder {target} does not exist"
                )));
            }
        }
        let mut affected = 0;
        for id in ids {
            if let Some(folder) = folders.get_mut(id).filter(|f| f.owner_id == owner_id) {
                folder.parent_id = parent_id;
                folder.updated_at = touch(folder.updated_at);
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<u64> {
        let mut folders = self.store.folders.write().await;
        let files = self.store.files.read().await;

        let doomed: Vec<Uuid> = ids
            .iter()
            .copied()
            .filter(|id| folders.get(id).is_some_and(|f| f.owner_id == owner_id))
            .collect();

        // Non-cascading: a referenced folder blocks the whole statement.
        let referenced = doomed.iter().any(|id| {
            files.values().any(|f| f.folder_id == Some(*id))
                || folders
                    .values()
                    .any(|f| f.parent_id == Some(*id) && !doomed.contains(&f.id))
        });
        if referenced {
            return Err(AppError::database(
                "Folder is still referenced by child rows",
            ));
        }

        for id in &doomed {
            folders.remove(id);
        }
        Ok(doomed.len() as u64)
    }
}
