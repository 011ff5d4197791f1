//! Error types for cursorchats.
//!
//! This module defines the error taxonomy for the shell of the application
//! using `thiserror`. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - Configuration file could not be read or parsed
//!   - [`LoggingError`] - Tracing subscriber could not be set up
//!   - [`DumpError`] - Writing the dump failed
//!     - [`DiscoverError`] - Walking the chats directory failed
//!     - [`StoreError`] - Opening or querying a chat store failed
//!     - `std::io::Error` - Writing to the output failed
//!
//! # Error Recovery Strategy
//!
//! Blob rendering never fails: malformed blobs are data-quality conditions
//! that select a fallback rendering (see [`crate::render`]). Undecodable chat
//! headers are written inline as diagnostic lines. Everything in this module
//! is fatal for the run and is reported on stderr by `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::meta::MetaDecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The output file could not be created.
    #[error("Failed to create output file {path:?}: {source}")]
    Output {
        /// Path given with `--output`.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Dumping the chat stores failed.
    #[error(transparent)]
    Dump(#[from] DumpError),
}

/// Errors raised while writing the dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Store discovery failed.
    #[error("discover: {0}")]
    Discover(#[from] DiscoverError),

    /// A store could not be read.
    ///
    /// The dump stops at the first unreadable store.
    #[error("dump {path:?}: {source}")]
    Store {
        /// Store file being dumped.
        path: PathBuf,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// Writing to the output failed (broken pipe, full disk, ...).
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors raised while walking the chats directory.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The directory tree could not be walked.
    ///
    /// This includes a missing chats directory and permission failures.
    #[error("failed to walk {root:?}: {source}")]
    Walk {
        /// Root of the walk.
        root: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Errors raised by the read-only SQLite store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened.
    #[error("failed to open {path:?} read-only: {source}")]
    Open {
        /// Database file.
        path: PathBuf,
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// A query against one of the store tables failed.
    ///
    /// Typically the file is not a chat store (missing `meta` or `blobs`
    /// table) or is not a SQLite database at all.
    #[error("{table}: {source}")]
    Query {
        /// Table being read (`meta` or `blobs`).
        table: &'static str,
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// The chat header under meta key `"0"` could not be decoded.
    #[error("meta key 0: {0}")]
    Meta(#[from] MetaDecodeError),
}
