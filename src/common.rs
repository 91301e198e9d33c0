//! Helpers shared by the export paths.

use std::path::{Path, PathBuf};

/// Append `suffix` to the file name unless it already ends with it
/// (compared case-insensitively).
pub fn ensure_suffix(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.to_lowercase().ends_with(&suffix.to_lowercase()) {
        path.to_path_buf()
    } else {
        path.with_file_name(format!("{}{}", name, suffix))
    }
}
