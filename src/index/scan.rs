//! Flat folder scanning
//!
//! Lists the image files directly inside a folder (no recursion) together
//! with their creation timestamps.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info};

use super::entry::FileEntry;

/// Extensions accepted by the scanner (lower-case, without dot).
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Errors that can occur while scanning a folder.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check whether a file name has one of the accepted image extensions.
pub fn is_accepted(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// List accepted image files in `dir`.
///
/// Subdirectories and names that are not valid UTF-8 are skipped. The
/// returned entries are in directory order; grouping sorts them.
pub fn scan_folder(dir: &Path) -> Result<Vec<FileEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let read_dir = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let Ok(name) = dir_entry.file_name().into_string() else {
            debug!(path = ?dir_entry.path(), "skipping non-UTF-8 file name");
            continue;
        };
        if !is_accepted(&name) {
            continue;
        }

        let metadata = match dir_entry.metadata() {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            // Vanished between listing and stat.
            Err(_) => continue,
        };

        entries.push(FileEntry::parse(name).with_created(creation_time(&metadata)));
    }

    info!(folder = %dir.display(), files = entries.len(), "scanned folder");
    Ok(entries)
}

/// Creation time, falling back to modification time where unsupported.
fn creation_time(metadata: &fs::Metadata) -> Option<SystemTime> {
    metadata.created().or_else(|_| metadata.modified()).ok()
}
