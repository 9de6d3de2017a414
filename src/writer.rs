//! The encode-side row assembler and event state machine.
//!
//! [`CsvWriter`] consumes structural events ([`CsvEvent`] or the typed
//! write methods), buffers per-row column values, and emits one terminated
//! row per completed record.
//!
//! ## Overview
//!
//! - A record opens when a start-array/start-object event arrives at the
//!   root and completes when its matching end event pops back to the root.
//!   Deeper start/end events only move the nesting stack.
//! - Each value resolves a destination column: the index set by the
//!   preceding field-name event (resolved through the bound schema), or the
//!   sequential row cursor.
//! - On completion, buffered columns are emitted in schema index order, not
//!   write order, with un-written interior indices as empty fields.
//! - Every field, header names included, goes through the same quoting
//!   logic in [`crate::quote`].
//!
//! ## Usage
//!
//! ```rust
//! use flatcsv::{CsvOptions, CsvWriter};
//!
//! let mut writer = CsvWriter::new(CsvOptions::new()).unwrap();
//! writer.start_array().unwrap();
//! writer.write_i32(13).unwrap();
//! writer.write_str("Joe \"Sixpack\" Paxson").unwrap();
//! writer.end_array().unwrap();
//! assert_eq!(writer.finish(), "13,\"Joe \"\"Sixpack\"\" Paxson\"\n");
//! ```
//!
//! ## Name-resolved writes
//!
//! ```rust
//! use flatcsv::{CsvOptions, CsvSchema, CsvWriter};
//!
//! let schema = CsvSchema::from_names(["age", "name"]).unwrap();
//! let mut writer = CsvWriter::with_schema(CsvOptions::new(), schema).unwrap();
//! writer.start_object().unwrap();
//! writer.field_name("name").unwrap();
//! writer.write_str("Joe").unwrap();
//! writer.field_name("age").unwrap();
//! writer.write_i32(13).unwrap();
//! writer.end_object().unwrap();
//! // Schema order, not write order.
//! assert_eq!(writer.finish(), "13,Joe\n");
//! ```

use crate::{quote, CsvEvent, CsvOptions, CsvSchema, CsvValue, Error, Number, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use num_bigint::BigInt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Array,
    Object { expect_name: bool },
}

impl Scope {
    fn desc(self) -> &'static str {
        match self {
            Scope::Array => "an ARRAY",
            Scope::Object { .. } => "an OBJECT",
        }
    }
}

/// The event-driven CSV encoder.
///
/// Holds instance-private mutable state (row buffer, nesting stack, row
/// cursor) with no internal synchronization; use one instance per thread or
/// stream. The bound [`CsvSchema`] is immutable and may be shared freely.
pub struct CsvWriter {
    out: String,
    options: CsvOptions,
    schema: Option<CsvSchema>,
    stack: Vec<Scope>,
    /// Encoded column values of the row being assembled; index = column.
    row: Vec<Option<String>>,
    /// Sequential column cursor, reset at row start.
    cursor: usize,
    /// Column index resolved from the last field-name event, if any.
    pending_column: Option<usize>,
    header_written: bool,
}

impl CsvWriter {
    /// Creates a writer without a schema.
    ///
    /// Sequential (array-wrapped) writes work without one; field-name
    /// resolution and header emission require [`CsvWriter::with_schema`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for ambiguous format parameters or
    /// when a header is requested without a schema to take names from.
    pub fn new(options: CsvOptions) -> Result<Self> {
        Self::build(options, None)
    }

    /// Creates a writer bound to a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for ambiguous format parameters.
    pub fn with_schema(options: CsvOptions, schema: CsvSchema) -> Result<Self> {
        Self::build(options, Some(schema))
    }

    fn build(options: CsvOptions, schema: Option<CsvSchema>) -> Result<Self> {
        options.validate()?;
        if options.write_header && schema.is_none() {
            return Err(Error::configuration(
                "no schema bound, but header writing requested",
            ));
        }
        Ok(CsvWriter {
            out: String::with_capacity(256),
            options,
            schema,
            stack: Vec::new(),
            row: Vec::new(),
            cursor: 0,
            pending_column: None,
            header_written: false,
        })
    }

    /// The bound schema, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&CsvSchema> {
        self.schema.as_ref()
    }

    /// The output produced so far (completed rows only).
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.out
    }

    /// Consumes the writer and returns the output.
    ///
    /// Completed records have already been flushed by their end events. A
    /// row left open by an unbalanced event sequence is discarded whole,
    /// never partially flushed.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Opens an array scope; at the root this starts a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] inside an object scope when a field
    /// name is expected instead.
    pub fn start_array(&mut self) -> Result<()> {
        self.verify_value_write("start an array")?;
        if self.stack.is_empty() {
            self.begin_row();
        }
        self.stack.push(Scope::Array);
        Ok(())
    }

    /// Closes an array scope; back at the root this completes the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] if the current scope is not an array.
    pub fn end_array(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Scope::Array) => {
                self.stack.pop();
            }
            Some(other) => {
                return Err(Error::structural(format!(
                    "current context not an ARRAY but {}",
                    other.desc()
                )));
            }
            None => {
                return Err(Error::structural(
                    "current context not an ARRAY but ROOT",
                ));
            }
        }
        if self.stack.is_empty() {
            self.finish_row();
        }
        Ok(())
    }

    /// Opens an object scope; at the root this starts a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] inside an object scope when a field
    /// name is expected instead.
    pub fn start_object(&mut self) -> Result<()> {
        self.verify_value_write("start an object")?;
        if self.stack.is_empty() {
            self.begin_row();
        }
        self.stack.push(Scope::Object { expect_name: true });
        Ok(())
    }

    /// Closes an object scope; back at the root this completes the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] if the current scope is not an object.
    pub fn end_object(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Scope::Object { .. }) => {
                self.stack.pop();
            }
            Some(other) => {
                return Err(Error::structural(format!(
                    "current context not an OBJECT but {}",
                    other.desc()
                )));
            }
            None => {
                return Err(Error::structural(
                    "current context not an OBJECT but ROOT",
                ));
            }
        }
        if self.stack.is_empty() {
            self.finish_row();
        }
        Ok(())
    }

    /// Resolves a field name through the schema for the next value write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] outside an object scope or when a value
    /// is expected, and [`Error::SchemaResolution`] when no schema is bound
    /// or the name is unknown (the diagnostic lists the known columns).
    pub fn field_name(&mut self, name: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Scope::Object { expect_name }) if *expect_name => {
                *expect_name = false;
            }
            Some(Scope::Object { .. }) => {
                return Err(Error::structural(
                    "can not write a field name, expecting a value",
                ));
            }
            _ => {
                return Err(Error::structural(
                    "can not write a field name, current context not an object",
                ));
            }
        }
        let Some(schema) = &self.schema else {
            return Err(Error::schema_resolution(
                name,
                "can not resolve without a schema",
            ));
        };
        match schema.index_of(name) {
            Some(index) => {
                self.pending_column = Some(index);
                Ok(())
            }
            None => Err(Error::schema_resolution(
                name,
                format!("known columns: {}", schema.known_columns()),
            )),
        }
    }

    /// Writes a string value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_scalar_text("write String value", text)
    }

    /// Writes a 32-bit integer value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_scalar_text("write number", &value.to_string())
    }

    /// Writes a 64-bit integer value.
    ///
    /// Values in 32-bit range take the same path as [`CsvWriter::write_i32`]
    /// (the canonical text is identical either way).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&value) {
            return self.write_i32(value as i32);
        }
        self.write_scalar_text("write number", &value.to_string())
    }

    /// Writes an arbitrary-precision integer value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_bigint(&mut self, value: &BigInt) -> Result<()> {
        self.write_scalar_text("write number", &value.to_string())
    }

    /// Writes a double value in its shortest round-trippable decimal form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_scalar_text("write number", &value.to_string())
    }

    /// Writes a single-precision float value (widened to double).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_f64(f64::from(value))
    }

    /// Writes a boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_scalar_text("write boolean value", if value { "true" } else { "false" })
    }

    /// Writes a null value as an empty field.
    ///
    /// Null-vs-empty-string disambiguation is a caller convention; see
    /// [`CsvOptions::with_quote_empty_strings`] for the encode-side half.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_null(&mut self) -> Result<()> {
        self.verify_scalar_write("write null value")?;
        let index = self.next_column_index();
        self.buffer_at(index, String::new());
        Ok(())
    }

    /// Writes raw bytes, Base64-encoded before quoting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_scalar_text("write Binary value", &BASE64.encode(data))
    }

    /// Writes any dynamic scalar value through its canonical text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when no row is open or a field name is
    /// expected.
    pub fn write_value(&mut self, value: &CsvValue) -> Result<()> {
        match value {
            CsvValue::Null => self.write_null(),
            CsvValue::Bool(b) => self.write_bool(*b),
            CsvValue::Number(Number::Int(i)) => self.write_i64(*i),
            CsvValue::Number(Number::BigInt(bi)) => self.write_bigint(bi),
            CsvValue::Number(Number::Float(f)) => self.write_f64(*f),
            CsvValue::String(s) => self.write_str(s),
            CsvValue::Bytes(b) => self.write_bytes(b),
        }
    }

    /// Dispatches one structural event.
    ///
    /// # Errors
    ///
    /// Propagates the error of the corresponding typed method.
    pub fn write_event(&mut self, event: &CsvEvent) -> Result<()> {
        match event {
            CsvEvent::StartArray => self.start_array(),
            CsvEvent::EndArray => self.end_array(),
            CsvEvent::StartObject => self.start_object(),
            CsvEvent::EndObject => self.end_object(),
            CsvEvent::FieldName(name) => self.field_name(name),
            CsvEvent::Value(value) => self.write_value(value),
        }
    }

    fn write_scalar_text(&mut self, what: &str, text: &str) -> Result<()> {
        self.verify_scalar_write(what)?;
        let index = self.next_column_index();
        let mut field = String::with_capacity(text.len() + 2);
        quote::write_field(&mut field, text, &self.options);
        self.buffer_at(index, field);
        Ok(())
    }

    /// Object scopes alternate field names and values; everything else
    /// accepts a value.
    fn verify_value_write(&mut self, what: &str) -> Result<()> {
        if let Some(Scope::Object { expect_name }) = self.stack.last_mut() {
            if *expect_name {
                return Err(Error::structural(format!(
                    "can not {what}, expecting a field name"
                )));
            }
            *expect_name = true;
        }
        Ok(())
    }

    fn verify_scalar_write(&mut self, what: &str) -> Result<()> {
        if self.stack.is_empty() {
            return Err(Error::structural(format!(
                "can not {what}, no row has been started"
            )));
        }
        self.verify_value_write(what)
    }

    fn next_column_index(&mut self) -> usize {
        let index = match self.pending_column.take() {
            Some(index) => index,
            None => self.cursor,
        };
        self.cursor += 1;
        index
    }

    fn buffer_at(&mut self, index: usize, encoded: String) {
        if self.row.len() <= index {
            self.row.resize(index + 1, None);
        }
        self.row[index] = Some(encoded);
    }

    fn begin_row(&mut self) {
        if !self.header_written {
            self.header_written = true;
            if self.options.write_header {
                self.emit_header();
            }
        }
        self.cursor = 0;
        self.pending_column = None;
    }

    /// Column names pass through the same quoting logic as data, so a
    /// header row round-trips through the same decoder.
    fn emit_header(&mut self) {
        let Some(schema) = &self.schema else { return };
        let mut line = String::new();
        for (i, column) in schema.columns().enumerate() {
            if i > 0 {
                line.push(self.options.separator);
            }
            quote::write_field(&mut line, column.name(), &self.options);
        }
        line.push_str(&self.options.line_terminator);
        self.out.push_str(&line);
    }

    fn finish_row(&mut self) {
        self.cursor = 0;
        self.pending_column = None;
        if self.row.is_empty() {
            return;
        }
        for (i, slot) in self.row.drain(..).enumerate() {
            if i > 0 {
                self.out.push(self.options.separator);
            }
            if let Some(encoded) = slot {
                self.out.push_str(&encoded);
            }
        }
        self.out.push_str(&self.options.line_terminator);
    }
}
