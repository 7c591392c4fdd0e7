//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Which blob provider backs the drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Local filesystem under `local_root`.
    #[default]
    Local,
    /// Process memory; contents are lost on restart.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Blob provider to use.
    #[serde(default)]
    pub provider: StorageProviderKind,
    /// Root path for the local filesystem provider.
    #[serde(default = "default_local_root")]
    pub local_root: String,
    /// Externally reachable base URL used when building signed URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum upload size in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Validity window of signed download URLs.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProviderKind::default(),
            local_root: default_local_root(),
            public_base_url: default_public_base_url(),
            max_upload_size_bytes: default_max_upload(),
            signed_url_ttl_seconds: default_signed_url_ttl(),
        }
    }
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}

fn default_signed_url_ttl() -> u64 {
    3600
}
