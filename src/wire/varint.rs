//! Base-128 varint decoding.
//!
//! Shared by the strict record parser and the heuristic text extractor.

use super::WireError;

/// Longest encoding of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Decode an unsigned varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// * [`WireError::UnexpectedEof`] if `buf` ends before the final byte
/// * [`WireError::VarintOverflow`] if the encoding does not fit in 64 bits
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;

    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        // The tenth byte may only carry the single remaining bit.
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(WireError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if buf.len() >= MAX_VARINT_LEN {
        Err(WireError::VarintOverflow)
    } else {
        Err(WireError::UnexpectedEof)
    }
}
