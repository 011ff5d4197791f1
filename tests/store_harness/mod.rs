//! Builds chat store fixtures in temporary directories.
//!
//! Shared by the integration tests that exercise the dump end to end.

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary chats directory.
pub struct ChatsDir {
    dir: TempDir,
}

impl ChatsDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp chats dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Start a store at `relative` (parent directories are created).
    pub fn store(&self, relative: &str) -> StoreBuilder {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create store directory");
        }
        StoreBuilder::create(path)
    }
}

/// Writes rows into a fresh chat store.
pub struct StoreBuilder {
    path: PathBuf,
    conn: Connection,
}

impl StoreBuilder {
    fn create(path: PathBuf) -> Self {
        let conn = Connection::open(&path).expect("Failed to create store");
        conn.execute_batch(
            "CREATE TABLE meta (key TEXT PRIMARY KEY, value TEXT);
             CREATE TABLE blobs (id TEXT PRIMARY KEY, data BLOB);",
        )
        .expect("Failed to create tables");
        Self { path, conn }
    }

    /// Store a chat header as hex-encoded JSON under key `"0"`.
    pub fn header(self, json: &str) -> Self {
        self.meta("0", &hex::encode(json.as_bytes()))
    }

    pub fn meta(self, key: &str, value: &str) -> Self {
        self.conn
            .execute("INSERT INTO meta (key, value) VALUES (?1, ?2)", params![key, value])
            .expect("Failed to insert meta row");
        self
    }

    pub fn blob(self, id: &str, data: &[u8]) -> Self {
        self.conn
            .execute("INSERT INTO blobs (id, data) VALUES (?1, ?2)", params![id, data])
            .expect("Failed to insert blob");
        self
    }

    /// Close the connection and return the store path.
    pub fn finish(self) -> PathBuf {
        drop(self.conn);
        self.path
    }
}

/// Dump `chats_dir` with default options and return the output.
pub fn dump_to_string(chats_dir: &Path) -> String {
    let mut out = Vec::new();
    cursorchats::dump_all(chats_dir, &mut out, &cursorchats::BlobRenderer::default())
        .expect("Dump should succeed");
    String::from_utf8(out).expect("Dump output should be UTF-8")
}
