//! Blob storage provider trait.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A time-limited retrieval URL for a single blob.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignedUrl {
    /// Absolute URL the client can fetch without further credentials.
    pub url: String,
    /// Instant after which the URL is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Trait for blob storage backends.
///
/// Blobs are addressed by an opaque storage key of the form
/// `{owner_id}/{uuid}.{ext}`. The trait is defined here so the service
/// layer never depends on a concrete provider; implementations live in
/// `drive-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a blob and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read a blob into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes to the given key, replacing any previous content.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the blob at the given key. Deleting a missing key is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given key.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Issue a signed retrieval URL valid for `ttl_seconds`.
    async fn signed_url(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl>;
}
