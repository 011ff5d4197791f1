//! Schema-less protocol-buffer wire format parsing.
//!
//! Without the `.proto` definitions the field semantics cannot be recovered,
//! so this module only reveals shape: field numbers, wire types and raw
//! values. Parsing is strict. The first malformed tag or value ends the
//! record stream; there is no attempt to resynchronize. For permissive text
//! recovery see [`crate::extract`].

pub mod varint;

pub use varint::{decode_varint, MAX_VARINT_LEN};

use std::fmt;
use thiserror::Error;

/// Largest field number accepted in a tag (`i32::MAX`).
///
/// Numbers above the 2^29 - 1 schema limit still parse, so reserved or
/// corrupted tags show up in dumps instead of ending them.
pub const MAX_FIELD_NUMBER: u64 = i32::MAX as u64;

/// Maximum nesting of start/end groups before parsing gives up.
pub const MAX_GROUP_DEPTH: usize = 100;

/// Length-delimited payloads up to this size are shown as text when valid UTF-8.
const MAX_INLINE_TEXT_LEN: usize = 200;

/// Number of payload bytes shown in a hex preview.
const MAX_HEX_PREVIEW: usize = 32;

/// Low-level wire format failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Input ended in the middle of a tag or value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Varint encoding does not fit in 64 bits.
    #[error("variable length integer overflow")]
    VarintOverflow,

    /// Field number is zero or above [`MAX_FIELD_NUMBER`].
    #[error("invalid field number")]
    InvalidFieldNumber,

    /// Wire types 6 and 7 are reserved.
    #[error("reserved wire type {0}")]
    ReservedWireType(u8),

    /// A group was closed by an end-group tag for a different field.
    #[error("mismatching end group marker")]
    UnmatchedEndGroup,

    /// Groups nested deeper than [`MAX_GROUP_DEPTH`].
    #[error("exceeded maximum group nesting depth")]
    RecursionLimit,
}

/// Encoding category of a field, taken from the low three bits of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// 0: base-128 varint.
    Varint,
    /// 1: little-endian 8 bytes.
    Fixed64,
    /// 2: length-delimited payload.
    Bytes,
    /// 3: opens a group.
    StartGroup,
    /// 4: closes a group.
    EndGroup,
    /// 5: little-endian 4 bytes.
    Fixed32,
    /// Reserved wire types (6, 7).
    Unrecognized(u8),
}

impl WireType {
    /// Decode the wire type from the low three bits of a tag.
    pub fn from_tag(tag: u64) -> Self {
        match tag & 0x7 {
            0 => Self::Varint,
            1 => Self::Fixed64,
            2 => Self::Bytes,
            3 => Self::StartGroup,
            4 => Self::EndGroup,
            5 => Self::Fixed32,
            other => Self::Unrecognized(other as u8),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varint => f.write_str("varint"),
            Self::Fixed32 => f.write_str("fixed32"),
            Self::Fixed64 => f.write_str("fixed64"),
            Self::Bytes => f.write_str("bytes"),
            Self::StartGroup => f.write_str("start_group"),
            Self::EndGroup => f.write_str("end_group"),
            Self::Unrecognized(n) => write!(f, "{}", n),
        }
    }
}

/// Decoded value of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Decoded varint.
    Varint(u64),
    /// Little-endian 32-bit value.
    Fixed32(u32),
    /// Little-endian 64-bit value.
    Fixed64(u64),
    /// Payload of a length-delimited field, without the length prefix.
    Bytes(&'a [u8]),
    /// Body of a group, without the closing end-group tag.
    Group(&'a [u8]),
    /// A stray end-group tag outside any group.
    EndGroup,
}

/// One field parsed from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    offset: usize,
    field_number: u32,
    wire_type: WireType,
    value: FieldValue<'a>,
}

impl<'a> Record<'a> {
    /// Byte offset of the field's tag within the parsed buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Field number from the tag.
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Wire type from the tag.
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Decoded value.
    pub fn value(&self) -> FieldValue<'a> {
        self.value
    }

    /// Render the value part of a dump line (everything after the colon).
    pub fn describe_value(&self) -> String {
        match self.value {
            FieldValue::Varint(v) => format!("varint {}", v),
            FieldValue::Fixed32(v) => format!("fixed32 {}", v),
            FieldValue::Fixed64(v) => format!("fixed64 {}", v),
            FieldValue::Bytes(inner) => describe_bytes(inner),
            FieldValue::Group(_) => "start_group (nested)".to_string(),
            FieldValue::EndGroup => "end_group".to_string(),
        }
    }
}

/// Why the record stream stopped early.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// The tag itself could not be read.
    #[error("wire parse error at offset {offset}: {source}")]
    Tag {
        /// Byte offset of the tag.
        offset: usize,
        /// Underlying wire error.
        #[source]
        source: WireError,
    },

    /// The tag was read but its value could not be.
    #[error("field {field_number} (wire {wire_type}) at offset {offset}: {source}")]
    Value {
        /// Byte offset of the tag.
        offset: usize,
        /// Field number from the tag.
        field_number: u32,
        /// Wire type from the tag.
        wire_type: WireType,
        /// Underlying wire error.
        #[source]
        source: WireError,
    },
}

/// Iterator over the top-level records of a buffer.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }

        let offset = self.pos;
        let rest = &self.data[offset..];

        let (field_number, wire_type, tag_len) = match consume_tag(rest) {
            Ok(tag) => tag,
            Err(source) => {
                self.failed = true;
                return Some(Err(RecordError::Tag { offset, source }));
            }
        };

        match consume_value(field_number, wire_type, &rest[tag_len..], 0) {
            Ok((value, value_len)) => {
                self.pos += tag_len + value_len;
                Some(Ok(Record {
                    offset,
                    field_number,
                    wire_type,
                    value,
                }))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(RecordError::Value {
                    offset,
                    field_number,
                    wire_type,
                    source,
                }))
            }
        }
    }
}

/// Parse `data` as a sequence of wire-format records, in encoded order.
pub fn parse_records(data: &[u8]) -> Records<'_> {
    Records {
        data,
        pos: 0,
        failed: false,
    }
}

/// Describe the wire structure of `data`, one line per field.
///
/// On failure a single diagnostic line is appended and the dump stops.
pub fn wire_dump(data: &[u8]) -> Vec<String> {
    parse_records(data)
        .map(|item| match item {
            Ok(record) => format!(
                "  field {} (wire {}): {}",
                record.field_number(),
                record.wire_type(),
                record.describe_value()
            ),
            Err(RecordError::Tag { offset, source }) => {
                format!("  (wire parse error at offset {}: {})", offset, source)
            }
            Err(RecordError::Value {
                field_number,
                wire_type,
                ..
            }) => format!(
                "  field {} (wire {}): (value parse error)",
                field_number, wire_type
            ),
        })
        .collect()
}

/// Read a tag, returning field number, wire type and bytes consumed.
fn consume_tag(buf: &[u8]) -> Result<(u32, WireType, usize), WireError> {
    let (tag, len) = decode_varint(buf)?;
    let number = tag >> 3;
    if number == 0 || number > MAX_FIELD_NUMBER {
        return Err(WireError::InvalidFieldNumber);
    }
    Ok((number as u32, WireType::from_tag(tag), len))
}

/// Read the value following a tag, returning it and the bytes consumed.
fn consume_value(
    field_number: u32,
    wire_type: WireType,
    buf: &[u8],
    depth: usize,
) -> Result<(FieldValue<'_>, usize), WireError> {
    match wire_type {
        WireType::Varint => {
            let (v, len) = decode_varint(buf)?;
            Ok((FieldValue::Varint(v), len))
        }
        WireType::Fixed32 => {
            let bytes: [u8; 4] = buf
                .get(..4)
                .and_then(|b| b.try_into().ok())
                .ok_or(WireError::UnexpectedEof)?;
            Ok((FieldValue::Fixed32(u32::from_le_bytes(bytes)), 4))
        }
        WireType::Fixed64 => {
            let bytes: [u8; 8] = buf
                .get(..8)
                .and_then(|b| b.try_into().ok())
                .ok_or(WireError::UnexpectedEof)?;
            Ok((FieldValue::Fixed64(u64::from_le_bytes(bytes)), 8))
        }
        WireType::Bytes => {
            let (declared, prefix_len) = decode_varint(buf)?;
            let available = (buf.len() - prefix_len) as u64;
            if declared > available {
                return Err(WireError::UnexpectedEof);
            }
            let end = prefix_len + declared as usize;
            Ok((FieldValue::Bytes(&buf[prefix_len..end]), end))
        }
        WireType::StartGroup => consume_group(field_number, buf, depth),
        WireType::EndGroup => Ok((FieldValue::EndGroup, 0)),
        WireType::Unrecognized(n) => Err(WireError::ReservedWireType(n)),
    }
}

/// Consume fields up to the end-group tag matching `field_number`.
fn consume_group(
    field_number: u32,
    buf: &[u8],
    depth: usize,
) -> Result<(FieldValue<'_>, usize), WireError> {
    if depth >= MAX_GROUP_DEPTH {
        return Err(WireError::RecursionLimit);
    }

    let mut pos = 0;
    loop {
        if pos >= buf.len() {
            return Err(WireError::UnexpectedEof);
        }
        let (number, wire_type, tag_len) = consume_tag(&buf[pos..])?;
        if wire_type == WireType::EndGroup {
            if number != field_number {
                return Err(WireError::UnmatchedEndGroup);
            }
            return Ok((FieldValue::Group(&buf[..pos]), pos + tag_len));
        }
        let (_, value_len) = consume_value(number, wire_type, &buf[pos + tag_len..], depth + 1)?;
        pos += tag_len + value_len;
    }
}

/// Text for a length-delimited payload: quoted text when it reads as a short
/// non-blank string, otherwise the length and a hex preview.
fn describe_bytes(inner: &[u8]) -> String {
    if !inner.is_empty() && inner.len() <= MAX_INLINE_TEXT_LEN {
        if let Ok(text) = std::str::from_utf8(inner) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return format!("bytes {} = {:?}", inner.len(), trimmed);
            }
        }
    }

    let shown = &inner[..inner.len().min(MAX_HEX_PREVIEW)];
    let mut line = format!("bytes {} hex {}", inner.len(), hex::encode(shown));
    if inner.len() > MAX_HEX_PREVIEW {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
