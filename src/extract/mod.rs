//! Heuristic text recovery from unschemed binary blobs.
//!
//! Unlike [`crate::wire`], this scanner never trusts the overall framing. It
//! looks for the two tags that carry most strings in practice (field 1 and
//! field 2, length-delimited), and keeps whichever candidate payloads decode
//! as legible UTF-8. Unrecognized bytes are skipped one at a time.

use crate::wire::decode_varint;

/// Tag byte for field 1, wire type 2.
pub const FIELD_1_BYTES_TAG: u8 = 0x0a;

/// Tag byte for field 2, wire type 2.
pub const FIELD_2_BYTES_TAG: u8 = 0x12;

/// Extract UTF-8 strings embedded as length-delimited fields 1 and 2.
///
/// Strings are trimmed of ASCII whitespace and kept when longer than one
/// byte. A length prefix that fails to decode ends the scan; a zero or
/// out-of-range length only skips the tag byte.
pub fn extract_strings(data: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;

    // A candidate needs at least a tag and a length byte.
    while i + 2 <= data.len() {
        let tag = data[i];
        i += 1;
        if tag != FIELD_1_BYTES_TAG && tag != FIELD_2_BYTES_TAG {
            continue;
        }

        let Ok((declared, consumed)) = decode_varint(&data[i..]) else {
            break;
        };

        let start = i + consumed;
        let remaining = (data.len() - start) as u64;
        if declared == 0 || declared > remaining {
            continue;
        }

        let end = start + declared as usize;
        if let Ok(text) = std::str::from_utf8(&data[start..end]) {
            let trimmed = trim_ascii_whitespace(text);
            if trimmed.len() > 1 {
                out.push(trimmed.to_string());
            }
        }
        i = end;
    }

    out
}

fn trim_ascii_whitespace(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}
