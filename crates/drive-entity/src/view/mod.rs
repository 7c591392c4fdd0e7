//! Presentation settings held by the drive session.

use serde::{Deserialize, Serialize};

/// Layout of the item listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Tiles.
    #[default]
    Grid,
    /// Rows.
    List,
}

/// Field the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Display name, case-insensitive.
    #[default]
    Name,
    /// Last update time.
    Modified,
    /// Size in bytes (folders count as zero).
    Size,
    /// MIME type for files; folders sort together.
    Type,
}
