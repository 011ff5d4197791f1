//! cursorchats
//!
//! Dumps the SQLite chat stores that Cursor keeps under `~/.cursor/chats`
//! as readable text.
//!
//! The core is pure: [`render`] turns one stored blob into display lines,
//! using [`wire`] and [`extract`] for binary blobs and [`model`] for JSON
//! messages. The shell around it ([`store`], [`dump`], [`config`],
//! [`logging`]) reads the stores and writes the output.

pub mod config;
pub mod dump;
pub mod extract;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;
pub mod wire;

pub use dump::{dump_all, dump_store, DumpSummary};
pub use render::{render_blob, BlobRenderer, RenderOptions};
