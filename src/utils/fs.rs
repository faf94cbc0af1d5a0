use std::path::Path;
use tokio::fs;

use crate::utils::{ConverterError, ConverterResult};

/// List the names of regular files in a directory.
///
/// Entries come back in whatever order the platform provides; directories and
/// other non-file entries are skipped.
pub async fn list_files(path: impl AsRef<Path>) -> ConverterResult<Vec<String>> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path).await.map_err(|e| {
        ConverterError::io(format!("Failed to read directory {}: {}", path.display(), e))
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if file_type.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

/// Check if directory exists
pub fn dir_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.exists() && path.is_dir()
}
