//! Per-file upload progress as shown by the drive session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one file within a batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Queued, not yet started.
    Pending,
    /// Blob write in progress.
    Uploading,
    /// Blob and metadata row written.
    Completed,
    /// Failed; see `UploadProgress::error`.
    Error,
}

impl UploadStatus {
    /// Check if the upload is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress entry for one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// Original file name.
    pub file_name: String,
    /// Completion percentage (0..=100).
    pub progress: u8,
    /// Current status.
    pub status: UploadStatus,
    /// Failure message when `status` is `Error`.
    pub error: Option<String>,
}

impl UploadProgress {
    /// A fresh pending entry.
    pub fn pending(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            progress: 0,
            status: UploadStatus::Pending,
            error: None,
        }
    }

    /// Move to `Uploading`. Ignored once terminal.
    pub fn start(&mut self) {
        if !self.status.is_terminal() {
            self.status = UploadStatus::Uploading;
            self.progress = 0;
        }
    }

    /// Move to `Completed` with 100 percent. Ignored once terminal.
    pub fn complete(&mut self) {
        if !self.status.is_terminal() {
            self.status = UploadStatus::Completed;
            self.progress = 100;
        }
    }

    /// Move to `Error`. Ignored once terminal.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.status.is_terminal() {
            self.status = UploadStatus::Error;
            self.error = Some(message.into());
        }
    }
}
