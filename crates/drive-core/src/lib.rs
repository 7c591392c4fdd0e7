//! # drive-core
//!
//! Core crate for Cloud Drive. Contains the error taxonomy, configuration
//! schemas, the blob storage provider trait, and shared sorting types.
//!
//! This crate has **no** internal dependencies on other Cloud Drive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
