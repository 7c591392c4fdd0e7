//! Folder domain entities.

pub mod breadcrumb;
pub mod model;

pub use breadcrumb::{Breadcrumb, ROOT_FOLDER_NAME};
pub use model::{CreateFolder, Folder};
