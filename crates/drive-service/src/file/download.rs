//! Signed download links and signed blob retrieval.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::traits::storage::{ByteStream, StorageProvider};
use drive_database::repositories::FileRepository;
use drive_storage::mime::{OCTET_STREAM, mime_from_name};
use drive_storage::signer::UrlSigner;

use crate::context::RequestContext;

/// A time-limited link to a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Signed URL.
    pub url: String,
    /// Name to save the content under.
    pub file_name: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Blob content opened through a signed URL.
pub struct SignedBlob {
    /// Content stream.
    pub stream: ByteStream,
    /// Content type guessed from the storage key.
    pub content_type: String,
}

/// Issues signed URLs for owned files and serves them back.
#[derive(Clone)]
pub struct DownloadService {
    /// File repository.
    file_repo: Arc<dyn FileRepository>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Verifier for incoming signed URLs.
    signer: UrlSigner,
    /// Validity window of issued URLs.
    ttl_seconds: u64,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        signer: UrlSigner,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            file_repo,
            storage,
            signer,
            ttl_seconds,
        }
    }

    /// Issues a signed URL for an owned file.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DownloadLink, AppError> {
        let file = self
            .file_repo
            .find_owned(ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let signed = self
            .storage
            .signed_url(&file.storage_path, self.ttl_seconds)
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "Download link issued");
        Ok(DownloadLink {
            url: signed.url,
            file_name: file.name,
            expires_at: signed.expires_at,
        })
    }

    /// Opens a blob addressed by a signed URL.
    pub async fn open_signed(
        &self,
        storage_path: &str,
        token: &str,
    ) -> Result<SignedBlob, AppError> {
        self.signer.verify(storage_path, token)?;
        let stream = self.storage.read(storage_path).await?;
        Ok(SignedBlob {
            stream,
            content_type: mime_from_name(storage_path)
                .unwrap_or(OCTET_STREAM)
                .to_string(),
        })
    }
}
