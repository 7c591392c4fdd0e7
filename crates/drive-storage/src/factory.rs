//! Provider construction from configuration.

use std::sync::Arc;

use tracing::info;

use drive_core::config::{StorageConfig, StorageProviderKind};
use drive_core::result::AppResult;
use drive_core::traits::storage::StorageProvider;

use crate::providers::{LocalStorageProvider, MemoryStorageProvider};
use crate::signer::UrlSigner;

/// Build the configured blob provider.
pub async fn build_provider(
    config: &StorageConfig,
    signer: UrlSigner,
) -> AppResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match config.provider {
        StorageProviderKind::Local => {
            Arc::new(LocalStorageProvider::new(&config.local_root, signer).await?)
        }
        StorageProviderKind::Memory => Arc::new(MemoryStorageProvider::new(signer)),
    };

    info!(
        provider = provider.provider_type(),
        root = %config.local_root,
        "Blob storage ready"
    );
    Ok(provider)
}
