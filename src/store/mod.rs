//! Read-only access to chat stores.
//!
//! Each chat is a SQLite file with two tables:
//! - `meta(key, value)`: chat header under key `"0"`, other keys opaque
//! - `blobs(id, data)`: message and state blobs, JSON or binary

pub mod discover;

pub use discover::{discover, StoreEntry};

use crate::model::{Blob, ChatMeta, MetaRow, StoreError, CHAT_META_KEY};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

const META_TABLE: &str = "meta";
const BLOBS_TABLE: &str = "blobs";

/// An open chat store.
pub struct ChatStore {
    path: PathBuf,
    conn: Connection,
}

impl ChatStore {
    /// Open a chat store (read-only).
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All `meta` rows in stored order.
    pub fn meta_rows(&self) -> Result<Vec<MetaRow>, StoreError> {
        let query_err = |source: rusqlite::Error| StoreError::Query {
            table: META_TABLE,
            source,
        };

        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM meta")
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(MetaRow::new(
                    lossy_text(row.get_ref(0)?),
                    raw_bytes(row.get_ref(1)?),
                ))
            })
            .map_err(query_err)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
    }

    /// All `blobs` rows in stored order. A NULL `data` reads as empty.
    pub fn blobs(&self) -> Result<Vec<Blob>, StoreError> {
        let query_err = |source: rusqlite::Error| StoreError::Query {
            table: BLOBS_TABLE,
            source,
        };

        let mut stmt = self
            .conn
            .prepare("SELECT id, data FROM blobs")
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Blob::new(
                    lossy_text(row.get_ref(0)?),
                    raw_bytes(row.get_ref(1)?),
                ))
            })
            .map_err(query_err)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
    }

    /// Decode the chat header stored under meta key `"0"`.
    ///
    /// Returns `Ok(None)` when the key is missing.
    pub fn chat_meta(&self) -> Result<Option<ChatMeta>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?1",
                [CHAT_META_KEY],
                |row| Ok(raw_bytes(row.get_ref(0)?)),
            )
            .optional()
            .map_err(|source| StoreError::Query {
                table: META_TABLE,
                source,
            })?;

        match value {
            Some(value) => Ok(Some(ChatMeta::decode_hex(&value)?)),
            None => Ok(None),
        }
    }
}

/// Column value as bytes, whatever its storage class.
fn raw_bytes(value: ValueRef<'_>) -> Vec<u8> {
    match value {
        ValueRef::Null => Vec::new(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes.to_vec(),
        ValueRef::Integer(i) => i.to_string().into_bytes(),
        ValueRef::Real(f) => f.to_string().into_bytes(),
    }
}

/// Column value as text; invalid UTF-8 is replaced.
fn lossy_text(value: ValueRef<'_>) -> String {
    String::from_utf8_lossy(&raw_bytes(value)).into_owned()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
