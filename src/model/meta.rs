//! Chat store metadata.
//!
//! The `meta` table keeps the chat header under key `"0"` as hex-encoded
//! JSON. Other keys are opaque and only their size is reported.

use chrono::{Local, SecondsFormat, TimeZone};
use serde::Deserialize;
use thiserror::Error;

/// Meta key holding the hex-encoded chat header.
pub const CHAT_META_KEY: &str = "0";

/// Why a chat header could not be decoded.
#[derive(Debug, Error)]
pub enum MetaDecodeError {
    /// The value is not an even-length hex string.
    #[error("meta value is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded bytes are not a JSON object of the header shape.
    #[error("meta value is not a chat header: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoded chat header (meta key `"0"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMeta {
    /// Id of the agent that owns the chat.
    pub agent_id: String,
    /// Blob id of the newest conversation root.
    pub latest_root_blob_id: String,
    /// Chat title.
    pub name: String,
    /// Composer mode, e.g. `"agent"`.
    pub mode: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Model name used for the latest turn.
    pub last_used_model: String,
}

impl ChatMeta {
    /// Decode the hex-encoded JSON stored under [`CHAT_META_KEY`].
    pub fn decode_hex(value: impl AsRef<[u8]>) -> Result<Self, MetaDecodeError> {
        let raw = hex::decode(value.as_ref().trim_ascii())?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// `created_at` as RFC 3339 in the local time zone.
    ///
    /// Falls back to the raw millisecond value when out of range.
    pub fn created_at_rfc3339(&self) -> String {
        match Local.timestamp_millis_opt(self.created_at).single() {
            Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => self.created_at.to_string(),
        }
    }

    /// One-line summary written under the store header.
    pub fn summary_line(&self) -> String {
        format!(
            "meta: name={:?} agentId={} createdAt={} mode={} lastUsedModel={}",
            self.name,
            self.agent_id,
            self.created_at_rfc3339(),
            self.mode,
            self.last_used_model
        )
    }
}
