//! # drive-storage
//!
//! Blob storage for Cloud Drive: a local filesystem provider, an
//! in-memory provider, storage-key generation, MIME guessing, and the
//! signer that turns a storage key into a time-limited retrieval URL.

pub mod factory;
pub mod key;
pub mod mime;
pub mod providers;
pub mod signer;

pub use factory::build_provider;
pub use key::storage_key;
pub use providers::{LocalStorageProvider, MemoryStorageProvider};
pub use signer::UrlSigner;
