//! Storage key generation.

use uuid::Uuid;

/// Longest extension carried over into a storage key.
const MAX_EXTENSION_LEN: usize = 16;

/// Build a fresh storage key `{owner_id}/{uuid}.{ext}` for an upload.
///
/// The extension comes from the original file name, lower-cased, and is
/// dropped when it is empty, longer than 16 characters, or contains
/// anything but ASCII alphanumerics.
pub fn storage_key(owner_id: Uuid, file_name: &str) -> String {
    let id = Uuid::new_v4();
    match extension(file_name) {
        Some(ext) => format!("{owner_id}/{id}.{ext}"),
        None => format!("{owner_id}/{id}"),
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
