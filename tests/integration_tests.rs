use flatcsv::{
    events_from_str, events_to_string, row, rows_from_str, rows_to_string,
    rows_to_string_with_schema, CsvEvent, CsvOptions, CsvReader, CsvSchema, CsvValue, CsvWriter,
    Error,
};

fn options() -> CsvOptions {
    CsvOptions::new().with_line_terminator("\n")
}

#[test]
fn test_quoted_field_with_doubled_quotes() {
    let rows = rows_from_str(" 13  ,\"Joe \"\"Sixpack\"\" Paxson\"", options()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0].as_i64(), Some(13));
    assert_eq!(rows[0][1].as_str(), Some("Joe \"Sixpack\" Paxson"));
}

#[test]
fn test_multiple_rows_with_quoting() {
    let rows = rows_from_str(
        "-3,\"\"\"Unknown\"\"\"\n\"13\"  ,\"Joe \"\"Sixpack\"\" Paxson\"",
        options(),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0].as_i64(), Some(-3));
    assert_eq!(rows[0][1].as_str(), Some("\"Unknown\""));
    assert_eq!(rows[1][0].as_i64(), Some(13));
    assert_eq!(rows[1][1].as_str(), Some("Joe \"Sixpack\" Paxson"));
}

#[test]
fn test_disabled_quoting_retains_quotes_as_data() {
    let opts = options().without_quote();

    let rows = rows_from_str("38,\"UNKNOWN\"\n27,a\"b\n", opts.clone()).unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(38));
    assert_eq!(rows[0][1].as_str(), Some("\"UNKNOWN\""));
    assert_eq!(rows[1][0].as_i64(), Some(27));
    assert_eq!(rows[1][1].as_str(), Some("a\"b"));

    // Re-encoding the decoded row reproduces the raw input exactly.
    let text = rows_to_string(&rows[..1], opts).unwrap();
    assert_eq!(text, "38,\"UNKNOWN\"\n");
}

#[test]
fn test_round_trip_with_header_and_schema() {
    let schema = CsvSchema::from_names(["id", "note"]).unwrap();
    let rows = vec![row![1, "plain"], row![2, "with, comma"], row![3, "say \"hi\""]];

    let text =
        rows_to_string_with_schema(&rows, schema, options().with_header(true)).unwrap();
    assert_eq!(
        text,
        "id,note\n1,plain\n2,\"with, comma\"\n3,\"say \"\"hi\"\"\"\n"
    );

    let back = rows_from_str(&text, options().with_header(true)).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn test_multi_line_field_round_trip() {
    let rows = vec![row!["first\nsecond", 1]];
    let text = rows_to_string(&rows, options()).unwrap();
    assert_eq!(text, "\"first\nsecond\",1\n");
    let back = rows_from_str(&text, options()).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn test_event_stream_round_trip() {
    let text = "1,a\n2,b\n3,c\n";
    let events = events_from_str(text, options()).unwrap();

    // One outer array wrapping array records.
    assert_eq!(events.first(), Some(&CsvEvent::StartArray));
    assert_eq!(events.last(), Some(&CsvEvent::EndArray));
    assert_eq!(
        events.iter().filter(|e| **e == CsvEvent::StartArray).count(),
        4
    );

    let back = events_to_string(events, options()).unwrap();
    assert_eq!(back, text);
}

#[test]
fn test_object_records_resolve_schema_order() {
    let schema = CsvSchema::from_names(["age", "name", "email"]).unwrap();
    let mut writer = CsvWriter::with_schema(options(), schema).unwrap();

    for (age, name, email) in [(13, "Joe", "joe@x"), (14, "Moe", "moe@x")] {
        writer.start_object().unwrap();
        writer.field_name("email").unwrap();
        writer.write_str(email).unwrap();
        writer.field_name("age").unwrap();
        writer.write_i32(age).unwrap();
        writer.field_name("name").unwrap();
        writer.write_str(name).unwrap();
        writer.end_object().unwrap();
    }
    assert_eq!(writer.finish(), "13,Joe,joe@x\n14,Moe,moe@x\n");
}

#[test]
fn test_missing_columns_fill_as_empty_fields() {
    let schema = CsvSchema::from_names(["a", "b", "c"]).unwrap();
    let mut writer = CsvWriter::with_schema(options(), schema).unwrap();
    writer.start_object().unwrap();
    writer.field_name("c").unwrap();
    writer.write_str("z").unwrap();
    writer.field_name("a").unwrap();
    writer.write_str("x").unwrap();
    writer.end_object().unwrap();
    assert_eq!(writer.finish(), "x,,z\n");
}

#[test]
fn test_unknown_column_does_not_corrupt_flushed_rows() {
    let schema = CsvSchema::from_names(["a"]).unwrap();
    let mut writer = CsvWriter::with_schema(options(), schema).unwrap();

    writer.start_object().unwrap();
    writer.field_name("a").unwrap();
    writer.write_i32(1).unwrap();
    writer.end_object().unwrap();

    writer.start_object().unwrap();
    let err = writer.field_name("bogus").unwrap_err();
    assert!(matches!(err, Error::SchemaResolution { .. }));

    // The first row survived untouched; the failed one is dropped on finish.
    assert_eq!(writer.finish(), "1\n");
}

#[test]
fn test_tab_separated_output() {
    let opts = options().with_separator('\t');
    let rows = vec![row![1, "a b", "c,d"]];
    let text = rows_to_string(&rows, opts.clone()).unwrap();
    // The comma is plain data under a tab separator.
    assert_eq!(text, "1\ta b\tc,d\n");
    let back = rows_from_str(&text, opts).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn test_crlf_terminated_output_decodes_back() {
    let opts = options().with_line_terminator("\r\n");
    let rows = vec![row![1], row![2]];
    let text = rows_to_string(&rows, opts).unwrap();
    assert_eq!(text, "1\r\n2\r\n");
    // Decoding does not depend on the configured terminator.
    let back = rows_from_str(&text, options()).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn test_numeric_classification_end_to_end() {
    let rows = rows_from_str(
        "123456789,123456789012345,9223372036854775808,2.5,true,\n",
        options(),
    )
    .unwrap();
    let row = &rows[0];
    assert_eq!(row[0].as_i64(), Some(123_456_789));
    assert_eq!(row[1].as_i64(), Some(123_456_789_012_345));
    // One past i64::MAX needs arbitrary precision.
    assert!(row[2].as_bigint().is_some());
    assert_eq!(row[3].as_f64(), Some(2.5));
    assert_eq!(row[4].as_bool(), Some(true));
    assert_eq!(row[5].as_str(), Some(""));
}

#[test]
fn test_decode_error_position_allows_resume() {
    let input = "good,row\n\"bad";
    let mut reader = CsvReader::new(input, options()).unwrap();
    reader.read_row().unwrap();
    let err = reader.read_row().unwrap_err();
    match err {
        Error::DecodeFormat { line, offset, .. } => {
            assert_eq!(line, 2);
            assert_eq!(offset, input.len());
        }
        other => panic!("expected DecodeFormat, got {other:?}"),
    }
}

#[test]
fn test_binary_values_are_base64_fields() {
    let mut writer = CsvWriter::new(options()).unwrap();
    writer.start_array().unwrap();
    writer.write_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
    writer.write_str("tag").unwrap();
    writer.end_array().unwrap();
    assert_eq!(writer.finish(), "3q2+7w==,tag\n");
}

#[test]
fn test_bigint_write_and_read_back() {
    let rows = vec![row![CsvValue::from(
        num_bigint::BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap()
    )]];
    let text = rows_to_string(&rows, options()).unwrap();
    assert_eq!(text, "123456789012345678901234567890\n");
    let back = rows_from_str(&text, options()).unwrap();
    assert_eq!(back, rows);
}
