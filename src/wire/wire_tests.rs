//! Tests for the strict wire-format parser and dumper.

use super::*;

// ===== Record Parsing =====

#[test]
fn parses_varint_field() {
    let records: Vec<_> = parse_records(&[0x08, 0x96, 0x01]).collect();

    assert_eq!(records.len(), 1);
    let record = records[0].expect("varint field should parse");
    assert_eq!(record.field_number(), 1);
    assert_eq!(record.wire_type(), WireType::Varint);
    assert_eq!(record.value(), FieldValue::Varint(150));
    assert_eq!(record.offset(), 0);
}

#[test]
fn parses_fixed_width_fields() {
    let mut data = vec![0x1d, 0x01, 0x00, 0x00, 0x00];
    data.push(0x21);
    data.extend_from_slice(&42u64.to_le_bytes());

    let records: Vec<_> = parse_records(&data)
        .collect::<Result<_, _>>()
        .expect("fixed fields should parse");

    assert_eq!(records[0].field_number(), 3);
    assert_eq!(records[0].value(), FieldValue::Fixed32(1));
    assert_eq!(records[1].field_number(), 4);
    assert_eq!(records[1].value(), FieldValue::Fixed64(42));
    assert_eq!(records[1].offset(), 5);
}

#[test]
fn records_follow_encoded_order_not_field_order() {
    let data = [0x12, 0x01, b'b', 0x0a, 0x01, b'a'];
    let numbers: Vec<u32> = parse_records(&data)
        .map(|r| r.expect("valid").field_number())
        .collect();

    assert_eq!(numbers, vec![2, 1]);
}

#[test]
fn group_value_excludes_end_marker() {
    // field 1 start_group { field 2 varint 1 } field 1 end_group, field 3 varint 7
    let data = [0x0b, 0x10, 0x01, 0x0c, 0x18, 0x07];
    let records: Vec<_> = parse_records(&data)
        .collect::<Result<_, _>>()
        .expect("group should parse");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].value(), FieldValue::Group(&[0x10, 0x01]));
    assert_eq!(records[1].offset(), 4);
    assert_eq!(records[1].value(), FieldValue::Varint(7));
}

#[test]
fn iteration_stops_after_first_error() {
    let data = [0x00, 0x08, 0x01];
    let items: Vec<_> = parse_records(&data).collect();

    assert_eq!(items.len(), 1, "No resynchronization after a bad tag");
    assert_eq!(
        items[0],
        Err(RecordError::Tag {
            offset: 0,
            source: WireError::InvalidFieldNumber
        })
    );
}

#[test]
fn field_numbers_up_to_i32_max_are_accepted() {
    // tag = 2^29 << 3, varint 1
    let data = [0x80, 0x80, 0x80, 0x80, 0x10, 0x01];
    let record = parse_records(&data).next().unwrap().unwrap();
    assert_eq!(record.field_number(), 1 << 29);
    assert_eq!(record.value(), FieldValue::Varint(1));

    // tag = (2^31 - 1) << 3
    let data = [0xf8, 0xff, 0xff, 0xff, 0x3f, 0x01];
    let record = parse_records(&data).next().unwrap().unwrap();
    assert_eq!(record.field_number(), i32::MAX as u32);
}

#[test]
fn field_number_above_i32_max_is_tag_error() {
    // tag = 2^31 << 3
    let data = [0x80, 0x80, 0x80, 0x80, 0x40, 0x01];
    assert_eq!(
        parse_records(&data).collect::<Vec<_>>(),
        vec![Err(RecordError::Tag {
            offset: 0,
            source: WireError::InvalidFieldNumber
        })]
    );
}

#[test]
fn truncated_length_delimited_value_is_value_error() {
    let items: Vec<_> = parse_records(&[0x0a, 0x05, b'h']).collect();

    assert_eq!(
        items,
        vec![Err(RecordError::Value {
            offset: 0,
            field_number: 1,
            wire_type: WireType::Bytes,
            source: WireError::UnexpectedEof,
        })]
    );
}

#[test]
fn huge_declared_length_does_not_panic() {
    // length = u64::MAX
    let mut data = vec![0x0a];
    data.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
    data.extend_from_slice(b"abc");

    let items: Vec<_> = parse_records(&data).collect();
    assert!(matches!(
        items.as_slice(),
        [Err(RecordError::Value {
            source: WireError::UnexpectedEof,
            ..
        })]
    ));
}

#[test]
fn unterminated_group_is_value_error() {
    let items: Vec<_> = parse_records(&[0x0b, 0x10, 0x01]).collect();
    assert!(matches!(
        items.as_slice(),
        [Err(RecordError::Value {
            wire_type: WireType::StartGroup,
            source: WireError::UnexpectedEof,
            ..
        })]
    ));
}

#[test]
fn mismatched_end_group_is_value_error() {
    let items: Vec<_> = parse_records(&[0x0b, 0x14]).collect();
    assert!(matches!(
        items.as_slice(),
        [Err(RecordError::Value {
            source: WireError::UnmatchedEndGroup,
            ..
        })]
    ));
}

#[test]
fn deeply_nested_groups_hit_recursion_limit() {
    let data = vec![0x0b; MAX_GROUP_DEPTH + 50];
    let items: Vec<_> = parse_records(&data).collect();
    assert!(matches!(
        items.as_slice(),
        [Err(RecordError::Value {
            source: WireError::RecursionLimit,
            ..
        })]
    ));
}

#[test]
fn wire_type_from_tag_covers_reserved_values() {
    assert_eq!(WireType::from_tag(0x0e), WireType::Unrecognized(6));
    assert_eq!(WireType::from_tag(0x0f), WireType::Unrecognized(7));
    assert_eq!(WireType::Unrecognized(6).to_string(), "6");
}

// ===== Dump Lines =====

#[test]
fn dump_varint_line() {
    assert_eq!(
        wire_dump(&[0x08, 0x96, 0x01]),
        vec!["  field 1 (wire varint): varint 150"]
    );
}

#[test]
fn dump_fixed_lines() {
    let mut data = vec![0x1d, 0x01, 0x00, 0x00, 0x00, 0x21];
    data.extend_from_slice(&7u64.to_le_bytes());

    assert_eq!(
        wire_dump(&data),
        vec![
            "  field 3 (wire fixed32): fixed32 1",
            "  field 4 (wire fixed64): fixed64 7",
        ]
    );
}

#[test]
fn dump_short_text_is_quoted_and_trimmed() {
    let data = [0x0a, 0x07, b' ', b'h', b'e', b'l', b'l', b'o', b'\n'];
    assert_eq!(
        wire_dump(&data),
        vec![r#"  field 1 (wire bytes): bytes 7 = "hello""#]
    );
}

#[test]
fn dump_blank_text_falls_back_to_hex() {
    assert_eq!(
        wire_dump(&[0x0a, 0x02, b' ', b' ']),
        vec!["  field 1 (wire bytes): bytes 2 hex 2020"]
    );
}

#[test]
fn dump_binary_payload_as_hex() {
    assert_eq!(
        wire_dump(&[0x0a, 0x02, 0xff, 0xfe]),
        vec!["  field 1 (wire bytes): bytes 2 hex fffe"]
    );
}

#[test]
fn dump_long_payload_hex_is_truncated() {
    let mut data = vec![0x12, 40];
    data.extend_from_slice(&[0xab; 40]);

    let lines = wire_dump(&data);
    let expected = format!("  field 2 (wire bytes): bytes 40 hex {}...", "ab".repeat(32));
    assert_eq!(lines, vec![expected]);
}

#[test]
fn dump_text_longer_than_inline_limit_is_hex() {
    let text = "x".repeat(201);
    let mut data = vec![0x0a, 0xc9, 0x01];
    data.extend_from_slice(text.as_bytes());

    let lines = wire_dump(&data);
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with("  field 1 (wire bytes): bytes 201 hex 7878"),
        "Oversized text should be shown as hex, got: {}",
        lines[0]
    );
    assert!(lines[0].ends_with("..."));
}

#[test]
fn dump_group_lines() {
    let data = [0x0b, 0x10, 0x01, 0x0c, 0x18, 0x07];
    assert_eq!(
        wire_dump(&data),
        vec![
            "  field 1 (wire start_group): start_group (nested)",
            "  field 3 (wire varint): varint 7",
        ]
    );
}

#[test]
fn dump_stray_end_group() {
    assert_eq!(
        wire_dump(&[0x0c]),
        vec!["  field 1 (wire end_group): end_group"]
    );
}

#[test]
fn dump_reports_tag_error_with_offset() {
    assert_eq!(
        wire_dump(&[0x08, 0x01, 0x00]),
        vec![
            "  field 1 (wire varint): varint 1",
            "  (wire parse error at offset 2: invalid field number)",
        ]
    );
}

#[test]
fn dump_reports_truncated_tag() {
    assert_eq!(
        wire_dump(&[0x80]),
        vec!["  (wire parse error at offset 0: unexpected end of input)"]
    );
}

#[test]
fn dump_reports_value_error() {
    assert_eq!(
        wire_dump(&[0x0a, 0x05, b'h']),
        vec!["  field 1 (wire bytes): (value parse error)"]
    );
}

#[test]
fn dump_reports_reserved_wire_type() {
    assert_eq!(
        wire_dump(&[0x0e, 0x00]),
        vec!["  field 1 (wire 6): (value parse error)"]
    );
}

#[test]
fn dump_of_empty_input_is_empty() {
    assert!(wire_dump(&[]).is_empty());
}
