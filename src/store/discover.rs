//! Finding chat stores under the chats directory.

use super::ChatStore;
use crate::model::DiscoverError;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::WalkDir;

/// A chat store file and the key it sorts by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Path of the `*.db` file.
    pub path: PathBuf,
    /// Chat creation time in epoch milliseconds; see [`sort_key`].
    pub created_at: i64,
}

/// Walk `chats_dir` recursively and return every `*.db` file, oldest chat first.
///
/// Ties keep walk order, which is sorted by file name.
///
/// # Errors
///
/// Fails if any part of the tree cannot be read, including a missing
/// `chats_dir`.
pub fn discover(chats_dir: &Path) -> Result<Vec<StoreEntry>, DiscoverError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(chats_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            root: chats_dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !is_store_file(entry.path()) {
            continue;
        }

        let path = entry.into_path();
        let created_at = sort_key(&path);
        debug!(path = %path.display(), created_at, "discovered chat store");
        entries.push(StoreEntry { path, created_at });
    }

    entries.sort_by_key(|e| e.created_at);
    Ok(entries)
}

/// `-wal` and `-shm` side files never match.
fn is_store_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".db")
}

/// The chat header's `createdAt`, else the file mtime in ms, else 0.
pub fn sort_key(path: &Path) -> i64 {
    let meta = ChatStore::open(path).and_then(|store| store.chat_meta());
    match meta {
        Ok(Some(meta)) => meta.created_at,
        Ok(None) => {
            debug!(path = %path.display(), "no chat header; sorting by mtime");
            mtime_ms(path)
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "unreadable chat header; sorting by mtime");
            mtime_ms(path)
        }
    }
}

fn mtime_ms(path: &Path) -> i64 {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}
