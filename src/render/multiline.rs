//! Expanded rendering of text that spans several lines.
//!
//! The primary rendering of a blob keeps embedded line breaks inside a
//! single output line. When a string contains `\n`, a secondary block
//! follows it: a header with the line count, then each physical line
//! indented under the primary one, optionally syntax-highlighted.

use super::highlight::SyntaxHighlighter;
use serde_json::Value;

/// Prefix of each line of an expanded block.
pub const EXPAND_INDENT: &str = "  │     ";

/// A multi-line string found inside a JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineBlock<'a> {
    /// Location within the value: `key.sub[2]`; empty for the root.
    pub path: String,
    /// The string itself, borrowed from the value.
    pub text: &'a str,
}

/// Number of physical lines in `text`.
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Split `text` on `\n` and indent each line.
///
/// With a highlighter the language is guessed first; plain text and
/// highlighting failures are rendered raw. Text without a line break
/// expands to nothing.
pub fn expand_text(text: &str, highlighter: Option<&SyntaxHighlighter>) -> Vec<String> {
    if !text.contains('\n') {
        return Vec::new();
    }

    let lines = highlighter
        .and_then(|h| h.highlight_detected(text))
        .unwrap_or_else(|| text.split('\n').map(str::to_string).collect());

    lines
        .into_iter()
        .map(|line| format!("{}{}", EXPAND_INDENT, line))
        .collect()
}

/// Secondary block for a chat message's flattened text.
pub fn full_message_section(text: &str, highlighter: Option<&SyntaxHighlighter>) -> Vec<String> {
    if !text.contains('\n') {
        return Vec::new();
    }
    let mut out = vec![format!("  ── full message ({} lines) ──", line_count(text))];
    out.extend(expand_text(text, highlighter));
    out
}

/// Collect every string leaf of `value` that contains a line break.
///
/// Object members are visited in document order, arrays by index.
pub fn collect_multiline_strings<'a>(
    value: &'a Value,
    path: &str,
    blocks: &mut Vec<MultilineBlock<'a>>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                collect_multiline_strings(child, &child_path, blocks);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_multiline_strings(child, &format!("{}[{}]", path, i), blocks);
            }
        }
        Value::String(s) if s.contains('\n') => blocks.push(MultilineBlock {
            path: path.to_string(),
            text: s,
        }),
        _ => {}
    }
}

/// Secondary blocks for every multi-line string inside a JSON value.
pub fn expand_json_strings(value: &Value, highlighter: Option<&SyntaxHighlighter>) -> Vec<String> {
    let mut blocks = Vec::new();
    collect_multiline_strings(value, "", &mut blocks);

    let mut out = Vec::new();
    for block in blocks {
        out.push(format!(
            "  ── {} ({} lines) ──",
            block.path,
            line_count(block.text)
        ));
        out.extend(expand_text(block.text, highlighter));
    }
    out
}
