//! Core traits implemented by the infrastructure crates.

pub mod storage;

pub use storage::{ByteStream, SignedUrl, StorageProvider};
