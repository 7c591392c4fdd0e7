//! Item kind discriminator and the file-or-folder union.

pub mod model;

pub use model::{DriveItem, ItemKind};
