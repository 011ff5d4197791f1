//! Domain model types (pure).
//!
//! All types in this module are plain data decoded from store rows.

pub mod error;
pub mod message;
pub mod meta;
pub mod row;

// Re-export for convenience
pub use error::{AppError, DiscoverError, DumpError, StoreError};
pub use message::{ChatMessage, ContentPart, MessageContent, MessageDecodeError, Role};
pub use meta::{ChatMeta, MetaDecodeError, CHAT_META_KEY};
pub use row::{Blob, MetaRow};
