//! Writing a plain-text dump of every chat store.
//!
//! Layout per store:
//!
//! ```text
//! === <path> ===
//! meta: name="..." agentId=... createdAt=... mode=... lastUsedModel=...
//! [meta key=<key> value_len=<n>]
//! <rendered blob lines>
//! ```

use crate::model::{ChatMeta, DumpError, MetaDecodeError, MetaRow, StoreError, CHAT_META_KEY};
use crate::render::BlobRenderer;
use crate::store::{discover, ChatStore};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts of what a dump wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Store files dumped.
    pub stores: usize,
    /// Blobs rendered across all stores.
    pub blobs: usize,
}

/// Dump every store under `chats_dir`, oldest chat first.
///
/// An empty corpus writes nothing. Stops at the first store that cannot be
/// read.
pub fn dump_all<W: Write>(
    chats_dir: &Path,
    out: &mut W,
    renderer: &BlobRenderer,
) -> Result<DumpSummary, DumpError> {
    let entries = discover(chats_dir)?;
    info!(
        chats_dir = %chats_dir.display(),
        stores = entries.len(),
        "discovered chat stores"
    );

    let mut summary = DumpSummary::default();
    for entry in &entries {
        summary.blobs += dump_store(&entry.path, out, renderer)?;
        summary.stores += 1;
    }

    out.flush()?;
    info!(stores = summary.stores, blobs = summary.blobs, "dump complete");
    Ok(summary)
}

/// Dump one store. Returns the number of blobs written.
pub fn dump_store<W: Write>(
    path: &Path,
    out: &mut W,
    renderer: &BlobRenderer,
) -> Result<usize, DumpError> {
    let store_err = |source: StoreError| DumpError::Store {
        path: path.to_path_buf(),
        source,
    };

    let store = ChatStore::open(path).map_err(store_err)?;
    writeln!(out, "=== {} ===", path.display())?;

    for row in store.meta_rows().map_err(store_err)? {
        writeln!(out, "{}", meta_line(&row))?;
    }

    let blobs = store.blobs().map_err(store_err)?;
    for blob in &blobs {
        for line in renderer.render(blob.id(), blob.data()) {
            writeln!(out, "{}", line)?;
        }
    }

    debug!(path = %path.display(), blobs = blobs.len(), "dumped chat store");
    Ok(blobs.len())
}

/// The single dump line for a `meta` row.
pub fn meta_line(row: &MetaRow) -> String {
    if row.key() != CHAT_META_KEY {
        return format!("[meta key={} value_len={}]", row.key(), row.value().len());
    }

    match ChatMeta::decode_hex(row.value()) {
        Ok(meta) => meta.summary_line(),
        Err(MetaDecodeError::Hex(err)) => {
            warn!(error = %err, "chat header is not valid hex");
            format!("[meta key={} hex-decode error]", row.key())
        }
        Err(MetaDecodeError::Json(err)) => {
            warn!(error = %err, "chat header is not valid JSON");
            format!("[meta key={} json error]", row.key())
        }
    }
}
