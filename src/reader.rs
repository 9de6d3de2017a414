//! The decode-side row resegmentation and event re-emission.
//!
//! [`CsvReader`] walks delimited text, resegments it into rows through the
//! quoting-aware field decoder in [`crate::quote`], classifies field text
//! into typed [`CsvValue`]s with the fast parsers in [`crate::num`], and
//! re-emits the structural event stream: one outer array wrapping either
//! array-of-arrays or array-of-objects records, per configuration.
//!
//! ## Usage
//!
//! Row-level access:
//!
//! ```rust
//! use flatcsv::{CsvOptions, CsvReader};
//!
//! let mut reader = CsvReader::new("13,Joe\n-3,Moe\n", CsvOptions::new()).unwrap();
//! let row = reader.read_row().unwrap().unwrap();
//! assert_eq!(row[0].as_i64(), Some(13));
//! assert_eq!(row[1].as_str(), Some("Joe"));
//! ```
//!
//! Event-level access (the reader is an iterator over events):
//!
//! ```rust
//! use flatcsv::{CsvEvent, CsvOptions, CsvReader};
//!
//! let reader = CsvReader::new("1,2\n", CsvOptions::new()).unwrap();
//! let events: Vec<CsvEvent> = reader.collect::<Result<_, _>>().unwrap();
//! assert_eq!(events.first(), Some(&CsvEvent::StartArray));
//! assert_eq!(events.last(), Some(&CsvEvent::EndArray));
//! ```

use crate::quote::{self, DecodedField};
use crate::{num, CsvEvent, CsvOptions, CsvSchema, CsvValue, Error, Number, Result};
use num_bigint::BigInt;
use std::collections::VecDeque;

/// The event-driven CSV decoder.
///
/// Holds instance-private mutable state with no internal synchronization;
/// use one instance per thread or stream. Physical row boundaries are
/// `\n`, `\r\n` and `\r` regardless of the configured output terminator;
/// blank lines between rows are skipped.
pub struct CsvReader<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    options: CsvOptions,
    schema: Option<CsvSchema>,
    queue: VecDeque<CsvEvent>,
    started: bool,
    done: bool,
}

impl<'a> CsvReader<'a> {
    /// Creates a reader without a schema.
    ///
    /// Object-wrapped emission needs one, either bound up front via
    /// [`CsvReader::with_schema`] or taken from the header row when
    /// [`CsvOptions::write_header`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for ambiguous format parameters.
    pub fn new(input: &'a str, options: CsvOptions) -> Result<Self> {
        Self::build(input, options, None)
    }

    /// Creates a reader bound to a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for ambiguous format parameters.
    pub fn with_schema(input: &'a str, options: CsvOptions, schema: CsvSchema) -> Result<Self> {
        Self::build(input, options, Some(schema))
    }

    fn build(input: &'a str, options: CsvOptions, schema: Option<CsvSchema>) -> Result<Self> {
        options.validate()?;
        Ok(CsvReader {
            input,
            pos: 0,
            line: 1,
            options,
            schema,
            queue: VecDeque::new(),
            started: false,
            done: false,
        })
    }

    /// The schema in effect, if any (bound or taken from the header).
    #[must_use]
    pub fn schema(&self) -> Option<&CsvSchema> {
        self.schema.as_ref()
    }

    /// The 1-based physical line the reader is at.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The byte offset into the input the reader is at; together with the
    /// line this is the resume point after a
    /// [`Error::DecodeFormat`].
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.pos
    }

    /// Reads one row of typed values.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeFormat`] for malformed field text, carrying
    /// the line and byte offset of the failure.
    pub fn read_row(&mut self) -> Result<Option<Vec<CsvValue>>> {
        let raw = self.read_raw_row()?;
        Ok(raw.map(|fields| fields.iter().map(|f| typed_value(&f.text)).collect()))
    }

    /// Reads one row and builds a schema from its texts.
    ///
    /// The header passes through the same field decoder as data, so quoted
    /// column names decode with no special-casing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeFormat`] if the input ends before a header
    /// row, and [`Error::Configuration`] on duplicate column names.
    pub fn read_header(&mut self) -> Result<CsvSchema> {
        match self.read_raw_row()? {
            Some(fields) => CsvSchema::from_names(fields.into_iter().map(|f| f.text)),
            None => Err(Error::decode(
                self.line,
                self.pos,
                "input ended before a header row",
            )),
        }
    }

    /// Reads one row of raw decoded fields, advancing past its terminator.
    fn read_raw_row(&mut self) -> Result<Option<Vec<DecodedField>>> {
        self.skip_blank_lines();
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        let mut fields = Vec::new();
        loop {
            let rest = &self.input[self.pos..];
            let field = quote::read_field(rest, &self.options)
                .map_err(|e| e.at(self.line, self.pos))?;
            self.line += count_line_breaks(&rest[..field.consumed]);
            self.pos += field.consumed;
            fields.push(field);
            match self.peek_char() {
                Some(c) if c == self.options.separator => {
                    self.pos += c.len_utf8();
                }
                Some('\n' | '\r') | None => {
                    self.consume_row_end();
                    break;
                }
                Some(c) => {
                    // read_field stops only at separators and terminators.
                    return Err(Error::decode(
                        self.line,
                        self.pos,
                        format!("unexpected character {c:?} at field boundary"),
                    ));
                }
            }
        }
        Ok(Some(fields))
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_blank_lines(&mut self) {
        while matches!(self.peek_char(), Some('\n' | '\r')) {
            self.consume_row_end();
        }
    }

    fn consume_row_end(&mut self) {
        match self.peek_char() {
            Some('\r') => {
                self.pos += 1;
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
            }
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
            }
            _ => {}
        }
    }

    /// Queues the record events for one row of values.
    fn enqueue_record(&mut self, row: Vec<CsvValue>, row_line: usize) -> Result<()> {
        if self.options.wrap_as_array {
            self.queue.push_back(CsvEvent::StartArray);
            for value in row {
                self.queue.push_back(CsvEvent::Value(value));
            }
            self.queue.push_back(CsvEvent::EndArray);
            return Ok(());
        }
        let Some(schema) = &self.schema else {
            return Err(Error::configuration(
                "object-wrapped decoding requires a schema; bind one or enable header reading",
            ));
        };
        if row.len() > schema.len() {
            return Err(Error::decode(
                row_line,
                self.pos,
                format!(
                    "row has {} fields but the schema defines {} columns",
                    row.len(),
                    schema.len()
                ),
            ));
        }
        self.queue.push_back(CsvEvent::StartObject);
        let names: Vec<String> = schema
            .columns()
            .take(row.len())
            .map(|c| c.name().to_string())
            .collect();
        for (name, value) in names.into_iter().zip(row) {
            self.queue.push_back(CsvEvent::FieldName(name));
            self.queue.push_back(CsvEvent::Value(value));
        }
        self.queue.push_back(CsvEvent::EndObject);
        Ok(())
    }

    fn next_event(&mut self) -> Option<Result<CsvEvent>> {
        if self.done {
            return None;
        }
        if let Some(event) = self.queue.pop_front() {
            return Some(Ok(event));
        }
        if !self.started {
            self.started = true;
            if self.options.write_header {
                match self.read_header() {
                    Ok(header) => {
                        if self.schema.is_none() {
                            self.schema = Some(header);
                        }
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }
            if !self.options.wrap_as_array && self.schema.is_none() {
                self.done = true;
                return Some(Err(Error::configuration(
                    "object-wrapped decoding requires a schema; bind one or enable header reading",
                )));
            }
            return Some(Ok(CsvEvent::StartArray));
        }
        let row_line = self.line;
        match self.read_row() {
            Ok(Some(row)) => {
                if let Err(e) = self.enqueue_record(row, row_line) {
                    self.done = true;
                    return Some(Err(e));
                }
                self.queue.pop_front().map(Ok)
            }
            Ok(None) => {
                self.done = true;
                Some(Ok(CsvEvent::EndArray))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl Iterator for CsvReader<'_> {
    type Item = Result<CsvEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut breaks = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => breaks += 1,
            b'\r' => {
                breaks += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    breaks
}

/// Classifies decoded field text into a typed value.
///
/// Classification looks at content only, after trimming ASCII space/tab
/// padding: digit runs become integers (64-bit when the range check allows,
/// arbitrary precision past it), `true`/`false` become booleans, decimal
/// and scientific literals become doubles, everything else stays the
/// original untrimmed string. Empty text is the empty string, never a null
/// marker; mapping empty to "no value" is a caller convention.
pub(crate) fn typed_value(text: &str) -> CsvValue {
    let trimmed = text.trim_matches(|c| c == ' ' || c == '\t');
    if trimmed.is_empty() {
        return CsvValue::String(String::new());
    }
    if trimmed == "true" {
        return CsvValue::Bool(true);
    }
    if trimmed == "false" {
        return CsvValue::Bool(false);
    }
    let bytes = trimmed.as_bytes();
    let negative = bytes[0] == b'-';
    let digits = if negative { &bytes[1..] } else { bytes };
    if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) {
        return integer_value(trimmed, digits, negative);
    }
    if looks_like_float(trimmed) {
        if let Ok(value) = num::parse_double(trimmed) {
            return CsvValue::Number(Number::Float(value));
        }
    }
    CsvValue::String(text.to_string())
}

fn integer_value(trimmed: &str, digits: &[u8], negative: bool) -> CsvValue {
    let magnitude = match digits.len() {
        1..=9 => i64::from(num::parse_int_digits(digits)),
        10..=18 => num::parse_long_digits(digits),
        _ => {
            if num::in_long_range(digits, negative) {
                // 19 digits at the edge of the range: let the standard
                // parser settle it rather than widening the fast path.
                match trimmed.parse::<i64>() {
                    Ok(value) => return CsvValue::Number(Number::Int(value)),
                    Err(_) => return bigint_value(digits, negative),
                }
            }
            return bigint_value(digits, negative);
        }
    };
    CsvValue::Number(Number::Int(if negative { -magnitude } else { magnitude }))
}

fn bigint_value(digits: &[u8], negative: bool) -> CsvValue {
    match BigInt::parse_bytes(digits, 10) {
        Some(value) => CsvValue::Number(Number::BigInt(if negative { -value } else { value })),
        // Unreachable for all-digit input; keep the text rather than guess.
        None => CsvValue::String(String::from_utf8_lossy(digits).into_owned()),
    }
}

fn looks_like_float(text: &str) -> bool {
    let mut saw_digit = false;
    let mut saw_marker = false;
    for c in text.chars() {
        match c {
            '0'..='9' => saw_digit = true,
            '.' | 'e' | 'E' => saw_marker = true,
            '+' | '-' => {}
            _ => return false,
        }
    }
    saw_digit && saw_marker
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CsvOptions {
        CsvOptions::new()
    }

    #[test]
    fn test_classification() {
        assert_eq!(typed_value(""), CsvValue::String(String::new()));
        assert_eq!(typed_value("true"), CsvValue::Bool(true));
        assert_eq!(typed_value("false"), CsvValue::Bool(false));
        assert_eq!(typed_value("13"), CsvValue::Number(Number::Int(13)));
        assert_eq!(typed_value(" 13  "), CsvValue::Number(Number::Int(13)));
        assert_eq!(typed_value("-3"), CsvValue::Number(Number::Int(-3)));
        assert_eq!(typed_value("2.5"), CsvValue::Number(Number::Float(2.5)));
        assert_eq!(typed_value("1e3"), CsvValue::Number(Number::Float(1000.0)));
        assert_eq!(typed_value("abc"), CsvValue::String("abc".to_string()));
        // Untrimmed text is kept for values that stay strings.
        assert_eq!(typed_value(" a "), CsvValue::String(" a ".to_string()));
        assert_eq!(typed_value("+13"), CsvValue::String("+13".to_string()));
        assert_eq!(typed_value("1.2.3"), CsvValue::String("1.2.3".to_string()));
        assert_eq!(typed_value("-"), CsvValue::String("-".to_string()));
    }

    #[test]
    fn test_classification_long_and_bigint() {
        assert_eq!(
            typed_value("123456789012345"),
            CsvValue::Number(Number::Int(123_456_789_012_345))
        );
        assert_eq!(
            typed_value("9223372036854775807"),
            CsvValue::Number(Number::Int(i64::MAX))
        );
        assert_eq!(
            typed_value("-9223372036854775808"),
            CsvValue::Number(Number::Int(i64::MIN))
        );
        let expected = BigInt::from(i64::MAX) + 1;
        assert_eq!(
            typed_value("9223372036854775808").as_bigint(),
            Some(&expected)
        );
        assert!(typed_value("123456789012345678901234567890")
            .as_bigint()
            .is_some());
    }

    #[test]
    fn test_read_rows() {
        let mut reader = CsvReader::new("13,Joe\n-3,Moe\n", opts()).unwrap();
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row[0].as_i64(), Some(13));
        assert_eq!(row[1].as_str(), Some("Joe"));
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row[0].as_i64(), Some(-3));
        assert!(reader.read_row().unwrap().is_none());
    }

    #[test]
    fn test_quoted_field_spanning_lines_stays_one_row() {
        let mut reader = CsvReader::new("\"a\nb\",c\nd\n", opts()).unwrap();
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row[0].as_str(), Some("a\nb"));
        assert_eq!(row[1].as_str(), Some("c"));
        // The embedded newline counted toward the physical line position.
        assert_eq!(reader.line(), 3);
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row[0].as_str(), Some("d"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut reader = CsvReader::new("a\n\n\nb\n", opts()).unwrap();
        assert_eq!(
            reader.read_row().unwrap().unwrap()[0].as_str(),
            Some("a")
        );
        assert_eq!(
            reader.read_row().unwrap().unwrap()[0].as_str(),
            Some("b")
        );
        assert!(reader.read_row().unwrap().is_none());
    }

    #[test]
    fn test_crlf_and_bare_cr_terminate_rows() {
        let mut reader = CsvReader::new("a\r\nb\rc", opts()).unwrap();
        assert_eq!(reader.read_row().unwrap().unwrap()[0].as_str(), Some("a"));
        assert_eq!(reader.read_row().unwrap().unwrap()[0].as_str(), Some("b"));
        assert_eq!(reader.read_row().unwrap().unwrap()[0].as_str(), Some("c"));
        assert!(reader.read_row().unwrap().is_none());
    }

    #[test]
    fn test_empty_fields() {
        let mut reader = CsvReader::new("a,,c\n", opts()).unwrap();
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1].as_str(), Some(""));
    }

    #[test]
    fn test_unterminated_quote_reports_position() {
        let mut reader = CsvReader::new("ok\n\"oops", opts()).unwrap();
        reader.read_row().unwrap();
        let err = reader.read_row().unwrap_err();
        match err {
            Error::DecodeFormat { line, offset, .. } => {
                assert_eq!(line, 2);
                assert_eq!(offset, 3 + "\"oops".len());
            }
            other => panic!("expected DecodeFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_array_wrapped_events() {
        let reader = CsvReader::new("1,x\n", opts()).unwrap();
        let events: Vec<CsvEvent> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(
            events,
            vec![
                CsvEvent::StartArray,
                CsvEvent::StartArray,
                CsvEvent::Value(CsvValue::from(1)),
                CsvEvent::Value(CsvValue::from("x")),
                CsvEvent::EndArray,
                CsvEvent::EndArray,
            ]
        );
    }

    #[test]
    fn test_object_wrapped_events() {
        let schema = CsvSchema::from_names(["age", "name"]).unwrap();
        let options = opts().with_wrap_as_array(false);
        let reader = CsvReader::with_schema("13,Joe\n", options, schema).unwrap();
        let events: Vec<CsvEvent> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(
            events,
            vec![
                CsvEvent::StartArray,
                CsvEvent::StartObject,
                CsvEvent::FieldName("age".to_string()),
                CsvEvent::Value(CsvValue::from(13)),
                CsvEvent::FieldName("name".to_string()),
                CsvEvent::Value(CsvValue::from("Joe")),
                CsvEvent::EndObject,
                CsvEvent::EndArray,
            ]
        );
    }

    #[test]
    fn test_object_mode_without_schema_is_configuration_error() {
        let mut reader = CsvReader::new("1\n", opts().with_wrap_as_array(false)).unwrap();
        let first = reader.next().unwrap();
        assert!(matches!(first, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_object_mode_takes_schema_from_header() {
        let options = opts().with_wrap_as_array(false).with_header(true);
        let reader = CsvReader::new("age,name\n13,Joe\n", options).unwrap();
        let events: Vec<CsvEvent> = reader.collect::<Result<_>>().unwrap();
        assert!(events.contains(&CsvEvent::FieldName("age".to_string())));
        assert!(events.contains(&CsvEvent::Value(CsvValue::from(13))));
    }

    #[test]
    fn test_object_mode_row_wider_than_schema() {
        let schema = CsvSchema::from_names(["only"]).unwrap();
        let options = opts().with_wrap_as_array(false);
        let reader = CsvReader::with_schema("1,2\n", options, schema).unwrap();
        let result: Result<Vec<CsvEvent>> = reader.collect();
        assert!(matches!(result, Err(Error::DecodeFormat { .. })));
    }

    #[test]
    fn test_header_consumed_before_data_in_array_mode() {
        let options = opts().with_header(true);
        let reader = CsvReader::new("age,name\n13,Joe\n", options).unwrap();
        let events: Vec<CsvEvent> = reader.collect::<Result<_>>().unwrap();
        // Header names do not appear as values.
        assert!(!events.contains(&CsvEvent::Value(CsvValue::from("age"))));
        assert!(events.contains(&CsvEvent::Value(CsvValue::from(13))));
    }

    #[test]
    fn test_empty_input_yields_empty_outer_array() {
        let reader = CsvReader::new("", opts()).unwrap();
        let events: Vec<CsvEvent> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(events, vec![CsvEvent::StartArray, CsvEvent::EndArray]);
    }
}
