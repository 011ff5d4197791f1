//! Last-resort visual dump of raw bytes.

use super::DUMP_PREFIX;

/// Bytes per row when the terminal width is unknown.
pub const DEFAULT_BYTE_DUMP_WIDTH: usize = 76;

/// Dump `data` as rows of `width` characters.
///
/// Printable US-ASCII (32..=126) is shown as-is, every other byte as `.`.
/// Empty input yields a single `(empty)` row. A width of zero is treated as one.
pub fn byte_dump(data: &[u8], width: usize) -> Vec<String> {
    if data.is_empty() {
        return vec![format!("{}(empty)", DUMP_PREFIX)];
    }

    data.chunks(width.max(1))
        .map(|row| {
            let mut line = String::with_capacity(DUMP_PREFIX.len() + row.len());
            line.push_str(DUMP_PREFIX);
            line.extend(row.iter().map(|&b| printable(b)));
            line
        })
        .collect()
}

fn printable(byte: u8) -> char {
    if (32..=126).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
