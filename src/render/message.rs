//! Rendering of JSON blobs: chat turns and generic JSON content.

use super::highlight::SyntaxHighlighter;
use super::multiline;
use super::{truncate_with_ellipsis, DUMP_PREFIX};
use crate::model::{ChatMessage, Role};
use crossterm::style::Stylize;
use serde_json::Value;

/// Maximum bytes of message text shown on the primary line.
pub const MAX_PREVIEW_LEN: usize = 800;

/// Maximum bytes of compact JSON shown when pretty-printing fails.
pub const MAX_RAW_JSON_LEN: usize = 500;

/// Role name, colored by role when `color` is on.
///
/// user: cyan, assistant: green, system: dark grey, tool: magenta,
/// anything else: yellow.
pub fn role_label(role: &str, color: bool) -> String {
    if !color {
        return role.to_string();
    }
    match Role::parse(role) {
        Role::User => role.cyan().to_string(),
        Role::Assistant => role.green().to_string(),
        Role::System => role.dark_grey().to_string(),
        Role::Tool => role.magenta().to_string(),
        Role::Other(_) => role.yellow().to_string(),
    }
}

/// Primary-line preview: length-capped, then trimmed.
///
/// Internal line breaks are kept.
pub fn preview(text: &str) -> String {
    truncate_with_ellipsis(text, MAX_PREVIEW_LEN).trim().to_string()
}

/// Pretty-print JSON with two-space indentation, keeping key order.
pub fn pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Render a chat turn: `<role>: <preview>`, plus the expanded message when
/// the text spans several lines.
pub fn render_chat_turn(
    message: &ChatMessage,
    color: bool,
    highlighter: Option<&SyntaxHighlighter>,
) -> Vec<String> {
    let text = message.display_text();
    let mut out = vec![format!(
        "{}: {}",
        role_label(message.role(), color),
        preview(&text)
    )];
    out.extend(multiline::full_message_section(&text, highlighter));
    out
}

/// Render non-chat JSON content: a header, the pretty-printed content, and
/// expanded blocks for any multi-line strings inside it.
pub fn render_generic_json(
    id: &str,
    len: usize,
    role: &str,
    content: &Value,
    highlighter: Option<&SyntaxHighlighter>,
) -> Vec<String> {
    let pretty = pretty_json(content).unwrap_or_else(|_| {
        truncate_with_ellipsis(&content.to_string(), MAX_RAW_JSON_LEN).into_owned()
    });

    let body = highlighter
        .and_then(|h| h.highlight_json(&pretty))
        .unwrap_or_else(|| pretty.split('\n').map(str::to_string).collect());

    let mut out = Vec::with_capacity(body.len() + 1);
    out.push(format!("[blob id={} len={}] (JSON, role={:?})", id, len, role));
    out.extend(body.into_iter().map(|line| format!("{}{}", DUMP_PREFIX, line)));
    out.extend(multiline::expand_json_strings(content, highlighter));
    out
}
