//! Blob classification and rendering.
//!
//! [`BlobRenderer::render`] turns one stored blob into display lines. Each
//! blob takes exactly one primary path, decided in this order:
//!
//! 1. empty: a single summary line
//! 2. not UTF-8: extracted text (if any), a note, and a byte dump
//! 3. not a JSON object: a summary line
//! 4. chat turn (`role` and non-empty text): `role: preview` plus the
//!    expanded message when it spans several lines
//! 5. other JSON with `content`: header, pretty-printed content, expanded
//!    multi-line strings
//! 6. anything else: a summary line
//!
//! Rendering is a pure function of the blob id, its bytes and the
//! [`RenderOptions`]; it never fails and never returns zero lines.

pub mod bytedump;
pub mod highlight;
pub mod message;
pub mod multiline;

pub use bytedump::{byte_dump, DEFAULT_BYTE_DUMP_WIDTH};
pub use highlight::{is_valid_theme, SyntaxHighlighter, DEFAULT_THEME, VALID_THEMES};
pub use multiline::{MultilineBlock, EXPAND_INDENT};

use crate::extract::extract_strings;
use crate::model::ChatMessage;
use crate::wire::wire_dump;
use std::borrow::Cow;
use tracing::trace;

/// Prefix of content lines under a blob header.
pub const DUMP_PREFIX: &str = "  │ ";

/// Maximum bytes shown per string extracted from a binary blob.
pub const MAX_EXTRACTED_LINE_LEN: usize = 400;

/// Options that shape the rendering of every blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Color roles and syntax-highlight JSON and expanded text.
    pub color: bool,
    /// Bytes per byte-dump row.
    pub byte_dump_width: usize,
    /// Append the wire-format structure of binary blobs.
    pub wire_structure: bool,
    /// Syntax highlighting theme (see [`VALID_THEMES`]).
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            byte_dump_width: DEFAULT_BYTE_DUMP_WIDTH,
            wire_structure: false,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Renders blobs with a fixed set of options.
///
/// Holds no mutable state; one renderer can be shared across threads.
#[derive(Debug, Clone)]
pub struct BlobRenderer {
    options: RenderOptions,
    highlighter: SyntaxHighlighter,
}

impl BlobRenderer {
    /// Create a renderer; the theme is resolved once here.
    pub fn new(options: RenderOptions) -> Self {
        let highlighter = SyntaxHighlighter::new(&options.theme);
        Self {
            options,
            highlighter,
        }
    }

    /// Options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one blob into display lines.
    pub fn render(&self, id: &str, data: &[u8]) -> Vec<String> {
        if data.is_empty() {
            return vec![summary_line(id, 0)];
        }

        if std::str::from_utf8(data).is_err() {
            trace!(id, len = data.len(), "binary blob");
            return self.render_binary(id, data);
        }

        let message = match ChatMessage::decode(data) {
            Ok(message) => message,
            Err(err) => {
                trace!(id, error = %err, "blob is not a JSON object");
                return vec![summary_line(id, data.len())];
            }
        };

        if message.is_chat_turn() {
            return message::render_chat_turn(&message, self.options.color, self.highlighter());
        }

        match message.raw_content() {
            Some(content) => message::render_generic_json(
                id,
                data.len(),
                message.role(),
                content,
                self.highlighter(),
            ),
            None => vec![summary_line(id, data.len())],
        }
    }

    fn render_binary(&self, id: &str, data: &[u8]) -> Vec<String> {
        let extracted = extract_strings(data);
        let width = self.options.byte_dump_width.max(1);
        let mut lines = Vec::with_capacity(3 + extracted.len() + data.len() / width + 1);

        if extracted.is_empty() {
            lines.push(format!(
                "[binary blob id={} len={}] (invalid utf8 sequence)",
                id,
                data.len()
            ));
            lines.push("  no length-delimited text found; raw byte dump below".to_string());
        } else {
            lines.push(format!(
                "[binary blob id={} len={}] (extracted text below)",
                id,
                data.len()
            ));
            for text in &extracted {
                lines.push(format!(
                    "{}{}",
                    DUMP_PREFIX,
                    truncate_with_ellipsis(text, MAX_EXTRACTED_LINE_LEN)
                ));
            }
            lines.push("  invalid utf8 sequence (extracted above; raw byte dump below)".to_string());
        }

        if self.options.wire_structure {
            lines.push("  wire structure:".to_string());
            lines.extend(wire_dump(data));
        }

        lines.extend(byte_dump(data, width));
        lines
    }

    fn highlighter(&self) -> Option<&SyntaxHighlighter> {
        self.options.color.then_some(&self.highlighter)
    }
}

impl Default for BlobRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Render one blob with the given options.
pub fn render_blob(id: &str, data: &[u8], options: &RenderOptions) -> Vec<String> {
    BlobRenderer::new(options.clone()).render(id, data)
}

fn summary_line(id: &str, len: usize) -> String {
    format!("[blob id={} len={}]", id, len)
}

/// Cap `s` at `max` bytes (on a char boundary), appending `...` when cut.
pub(crate) fn truncate_with_ellipsis(s: &str, max: usize) -> Cow<'_, str> {
    if s.len() <= max {
        return Cow::Borrowed(s);
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", &s[..end]))
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
