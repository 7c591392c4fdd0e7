//! In-memory wiring and fault-injecting wrappers for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use drive_core::config::StorageConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::storage::{ByteStream, SignedUrl, StorageProvider};
use drive_database::repositories::{
    FileRepository, MemoryFileRepository, MemoryFolderRepository, MemoryStore,
};
use drive_entity::file::{CreateFile, File};
use drive_storage::providers::MemoryStorageProvider;
use drive_storage::signer::UrlSigner;

use crate::context::RequestContext;
use crate::drive::DriveService;

pub(crate) const SECRET: &str = "unit-test-secret";

pub(crate) fn signer() -> UrlSigner {
    UrlSigner::new(SECRET, "http://drive.test")
}

pub(crate) fn plain_files(files: MemoryFileRepository) -> Arc<dyn FileRepository> {
    Arc::new(files)
}

pub(crate) fn plain_blobs(blobs: MemoryStorageProvider) -> Arc<dyn StorageProvider> {
    Arc::new(blobs)
}

/// A drive over in-memory stores with one signed-in user.
pub(crate) struct Harness {
    pub ctx: RequestContext,
    pub store: Arc<MemoryStore>,
    pub blobs: MemoryStorageProvider,
    pub drive: DriveService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    pub fn with_config(config: StorageConfig) -> Self {
        Self::build(plain_files, plain_blobs, config)
    }

    pub fn build(
        files: impl FnOnce(MemoryFileRepository) -> Arc<dyn FileRepository>,
        storage: impl FnOnce(MemoryStorageProvider) -> Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        let store = MemoryStore::new();
        let blobs = MemoryStorageProvider::new(signer());
        let drive = DriveService::new(
            files(MemoryFileRepository::new(Arc::clone(&store))),
            Arc::new(MemoryFolderRepository::new(Arc::clone(&store))),
            storage(blobs.clone()),
            signer(),
            &config,
        );
        Self {
            ctx: RequestContext::new(Uuid::new_v4()),
            store,
            blobs,
            drive,
        }
    }

    /// Context of a second, unrelated user.
    pub fn stranger(&self) -> RequestContext {
        RequestContext::new(Uuid::new_v4())
    }
}

/// File repository with injectable insert and listing failures.
#[derive(Debug)]
pub(crate) struct ScriptedFiles {
    pub inner: MemoryFileRepository,
    pub reject_inserts: bool,
    pub fail_listing: Arc<AtomicBool>,
}

impl ScriptedFiles {
    pub fn rejecting_inserts(inner: MemoryFileRepository) -> Self {
        Self {
            inner,
            reject_inserts: true,
            fail_listing: Arc::default(),
        }
    }

    pub fn with_listing_switch(inner: MemoryFileRepository, switch: Arc<AtomicBool>) -> Self {
        Self {
            inner,
            reject_inserts: false,
            fail_listing: switch,
        }
    }
}

#[async_trait]
impl FileRepository for ScriptedFiles {
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        self.inner.find_owned(owner_id, id).await
    }

    async fn find_many_owned(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<File>> {
        self.inner.find_many_owned(owner_id, ids).await
    }

    async fn list_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset"));
        }
        self.inner.list_in_folder(owner_id, folder_id).await
    }

    async fn list_starred(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        self.inner.list_starred(owner_id).await
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        self.inner.list_trashed(owner_id).await
    }

    async fn list_recent(&self, owner_id: Uuid, limit: u32) -> AppResult<Vec<File>> {
        self.inner.list_recent(owner_id, limit).await
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        if self.reject_inserts {
            return Err(AppError::database("insert rejected"));
        }
        self.inner.create(data).await
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<Option<File>> {
        self.inner.rename(owner_id, id, name).await
    }

    async fn set_trashed(&self, owner_id: Uuid, ids: &[Uuid], trashed: bool) -> AppResult<u64> {
        self.inner.set_trashed(owner_id, ids, trashed).await
    }

    async fn toggle_star(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        self.inner.toggle_star(owner_id, id).await
    }

    async fn move_to(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        folder_id: Option<Uuid>,
    ) -> AppResult<u64> {
        self.inner.move_to(owner_id, ids, folder_id).await
    }

    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<u64> {
        self.inner.delete_many(owner_id, ids).await
    }
}

/// Blob provider with switchable write and delete failures.
#[derive(Debug)]
pub(crate) struct FaultyStorage {
    pub inner: MemoryStorageProvider,
    pub fail_writes: bool,
    pub fail_deletes: bool,
}

#[async_trait]
impl StorageProvider for FaultyStorage {
    fn provider_type(&self) -> &str {
        "faulty"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.fail_writes)
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        self.inner.read(path).await
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::storage("bucket unavailable"));
        }
        self.inner.write(path, data).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        if self.fail_deletes {
            return Err(AppError::storage("bucket unavailable"));
        }
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }

    async fn signed_url(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl> {
        self.inner.signed_url(path, ttl_seconds).await
    }
}
