//! Unified application error types for Cloud Drive.
//!
//! Every crate maps its internal failures into [`AppError`]. The kinds
//! below are the user-facing taxonomy surfaced by the drive session and
//! the REST facade, plus a handful of infrastructure kinds that are
//! folded into [`ErrorKind::Fetch`] at the service boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No caller identity, or the identity could not be verified.
    Unauthorized,
    /// Input validation failed (empty name, missing field, size limit).
    Validation,
    /// A sibling with the same name already exists.
    Conflict,
    /// The row is missing or not owned by the caller.
    NotFound,
    /// The folder still has children.
    NotEmpty,
    /// Writing the blob failed.
    Upload,
    /// Recording the metadata row failed.
    Metadata,
    /// Generic transport or service failure.
    Fetch,
    /// A database error occurred.
    Database,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind belongs to the user-facing taxonomy.
    ///
    /// Infrastructure kinds are converted to `Fetch` before they leave the
    /// service layer.
    pub fn is_taxonomy(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::Validation
                | Self::Conflict
                | Self::NotFound
                | Self::NotEmpty
                | Self::Upload
                | Self::Metadata
                | Self::Fetch
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NotEmpty => write!(f, "NOT_EMPTY"),
            Self::Upload => write!(f, "UPLOAD"),
            Self::Metadata => write!(f, "METADATA"),
            Self::Fetch => write!(f, "FETCH"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Cloud Drive.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-empty error.
    pub fn not_empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotEmpty, message)
    }

    /// Create an upload error.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upload, message)
    }

    /// Create a metadata error.
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Metadata, message)
    }

    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Fold infrastructure kinds into `Fetch`, keeping taxonomy kinds as-is.
    pub fn into_fetch(self) -> Self {
        if self.kind.is_taxonomy() {
            self
        } else {
            Self {
                kind: ErrorKind::Fetch,
                message: self.message,
                source: self.source,
            }
        }
    }

    /// Returns `true` if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_fetch_folds_infrastructure_kinds() {
        let err = AppError::database("connection reset").into_fetch();
        assert_eq!(err.kind, ErrorKind::Fetch);
        assert_eq!(err.message, "connection reset");
    }

    #[test]
    fn test_into_fetch_keeps_taxonomy_kinds() {
        let err = AppError::conflict("Folder with this name already exists").into_fetch();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = AppError::not_empty("has children").into_fetch();
        assert!(err.is(ErrorKind::NotEmpty));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::validation("Folder name is required");
        assert_eq!(err.to_string(), "VALIDATION: Folder name is required");
    }
}
