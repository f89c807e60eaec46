//! Upload filename generation.
//!
//! Filenames are `{unix_millis}-{8 hex chars}{.ext}`. The timestamp keeps names
//! sortable by arrival; the random suffix keeps same-millisecond uploads apart.

use chrono::Utc;
use uuid::Uuid;

const MAX_EXTENSION_LENGTH: usize = 16;

/// Generate a practically unique filename that keeps the original extension.
///
/// Extensions that are empty, too long, or not purely alphanumeric are dropped.
pub fn generate_upload_filename(extension: Option<&str>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let stem = format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8]);

    match extension.and_then(sanitize_extension) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

fn sanitize_extension(extension: &str) -> Option<String> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty()
        || extension.len() > MAX_EXTENSION_LENGTH
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
