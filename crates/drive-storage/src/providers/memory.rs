//! In-process blob provider.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::stream;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::storage::{ByteStream, SignedUrl, StorageProvider};

use crate::signer::UrlSigner;

/// Blobs held in a concurrent map. Contents do not survive a restart.
#[derive(Debug, Clone)]
pub struct MemoryStorageProvider {
    blobs: Arc<DashMap<String, Bytes>>,
    signer: UrlSigner,
}

impl MemoryStorageProvider {
    /// Create an empty provider.
    pub fn new(signer: UrlSigner) -> Self {
        Self {
            blobs: Arc::new(DashMap::new()),
            signer,
        }
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    fn key(path: &str) -> String {
        path.trim_start_matches('/').to_string()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let data = self.read_bytes(path).await?;
        Ok(Box::pin(stream::once(async move { Ok(data) })))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.blobs
            .get(&Self::key(path))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {path}")))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.blobs.insert(Self::key(path), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.blobs.remove(&Self::key(path));
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(&Self::key(path)))
    }

    async fn signed_url(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl> {
        self.signer.sign(path, ttl_seconds)
    }
}
