//! # flatcsv
//!
//! An event-driven codec between structural data-events and flat delimited
//! text (CSV/TSV-style rows).
//!
//! ## What it does
//!
//! The encode side consumes a stream of structural events (start/end of an
//! object or array, field names, scalar values) and assembles them into
//! delimited rows with reversible quoting and escaping. The decode side
//! resegments delimited text into rows (quoting-aware, so fields may span
//! physical lines) and re-emits the symmetric event stream, with a
//! fast-path decimal parser classifying numeric fields.
//!
//! ## Key Features
//!
//! - **Event state machine**: records map onto rows through an explicit
//!   nesting stack and row cursor, never recursion
//! - **Schema-driven columns**: output order is always schema index order,
//!   regardless of the order field values arrive in
//! - **Reversible quoting**: embedded separators, line breaks and quote
//!   characters survive a round trip; quoting can be disabled entirely for
//!   raw passthrough
//! - **Fast numeric decode**: bounded-width digit runs skip the general
//!   parser; a digit-wise range check picks int64 vs big-integer without
//!   parsing
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use flatcsv::{rows_from_str, rows_to_string, row, CsvOptions};
//!
//! let rows = vec![row![13, "Joe \"Sixpack\" Paxson"], row![-3, "\"Unknown\""]];
//!
//! let text = rows_to_string(&rows, CsvOptions::new().with_line_terminator("\n")).unwrap();
//! assert_eq!(text, "13,\"Joe \"\"Sixpack\"\" Paxson\"\n-3,\"\"\"Unknown\"\"\"\n");
//!
//! let back = rows_from_str(&text, CsvOptions::new()).unwrap();
//! assert_eq!(back, rows);
//! ```
//!
//! ## Working with events
//!
//! The lower-level [`CsvWriter`]/[`CsvReader`] pair speaks the document
//! walker contract directly:
//!
//! ```rust
//! use flatcsv::{CsvOptions, CsvSchema, CsvWriter};
//!
//! let schema = CsvSchema::from_names(["age", "name"]).unwrap();
//! let options = CsvOptions::new().with_line_terminator("\n").with_header(true);
//! let mut writer = CsvWriter::with_schema(options, schema).unwrap();
//!
//! writer.start_object().unwrap();
//! writer.field_name("name").unwrap();
//! writer.write_str("Joe").unwrap();
//! writer.field_name("age").unwrap();
//! writer.write_i32(13).unwrap();
//! writer.end_object().unwrap();
//!
//! assert_eq!(writer.finish(), "age,name\n13,Joe\n");
//! ```
//!
//! ## Scope
//!
//! This crate stops at the event boundary: walking object
//! graphs to produce events (or consuming them back into object graphs) is
//! a collaborator's job, as are charset transcoding and buffering below the
//! text level. [`CsvValue`] implements serde's `Serialize`/`Deserialize` as
//! the bridge for such walkers. Format parameters are fixed per codec
//! instance; there is no dialect auto-detection.
//!
//! ## Concurrency
//!
//! Everything runs synchronously on the caller's thread. Writers and
//! readers are single-owner with no internal locking; a [`CsvSchema`] is
//! immutable after construction and safe to share between instances.

pub mod error;
pub mod event;
pub mod macros;
pub mod num;
pub mod options;
pub mod quote;
pub mod reader;
pub mod schema;
pub mod value;
pub mod writer;

pub use error::{Error, Result};
pub use event::CsvEvent;
pub use options::CsvOptions;
pub use quote::DecodedField;
pub use reader::CsvReader;
pub use schema::{Column, CsvSchema, CsvSchemaBuilder};
pub use value::{CsvValue, Number};
pub use writer::CsvWriter;

use std::io;

/// Encodes rows of values, one array-wrapped record per row.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{rows_to_string, row, CsvOptions};
///
/// let options = CsvOptions::new().with_line_terminator("\n");
/// let text = rows_to_string(&[row![1, "a"], row![2, "b"]], options).unwrap();
/// assert_eq!(text, "1,a\n2,b\n");
/// ```
///
/// # Errors
///
/// Returns an error for invalid options; a header needs a schema, so use
/// [`rows_to_string_with_schema`] when [`CsvOptions::write_header`] is set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_to_string(rows: &[Vec<CsvValue>], options: CsvOptions) -> Result<String> {
    let writer = CsvWriter::new(options)?;
    write_rows(writer, rows)
}

/// Encodes rows of values with a bound schema, emitting a header row when
/// [`CsvOptions::write_header`] is set.
///
/// # Errors
///
/// Returns an error for invalid options.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_to_string_with_schema(
    rows: &[Vec<CsvValue>],
    schema: CsvSchema,
    options: CsvOptions,
) -> Result<String> {
    let writer = CsvWriter::with_schema(options, schema)?;
    write_rows(writer, rows)
}

fn write_rows(mut writer: CsvWriter, rows: &[Vec<CsvValue>]) -> Result<String> {
    for row in rows {
        writer.start_array()?;
        for value in row {
            writer.write_value(value)?;
        }
        writer.end_array()?;
    }
    Ok(writer.finish())
}

/// Encodes rows of values to an `io::Write` sink.
///
/// # Errors
///
/// Returns an error for invalid options or a failing sink.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_to_writer<W>(mut writer: W, rows: &[Vec<CsvValue>], options: CsvOptions) -> Result<()>
where
    W: io::Write,
{
    let text = rows_to_string(rows, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(e.to_string()))
}

/// Decodes delimited text into rows of typed values.
///
/// When [`CsvOptions::write_header`] is set, the first row is consumed as
/// the header and not returned.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{rows_from_str, CsvOptions};
///
/// let rows = rows_from_str("13,Joe\n-3,Moe\n", CsvOptions::new()).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0][0].as_i64(), Some(13));
/// ```
///
/// # Errors
///
/// Returns an error for invalid options or malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_from_str(input: &str, options: CsvOptions) -> Result<Vec<Vec<CsvValue>>> {
    let consume_header = options.write_header;
    let mut reader = CsvReader::new(input, options)?;
    if consume_header {
        reader.read_header()?;
    }
    let mut rows = Vec::new();
    while let Some(row) = reader.read_row()? {
        rows.push(row);
    }
    Ok(rows)
}

/// Decodes delimited text from an `io::Read` source into rows of typed
/// values.
///
/// # Errors
///
/// Returns an error for a failing source, invalid options, or malformed
/// input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_from_reader<R>(mut reader: R, options: CsvOptions) -> Result<Vec<Vec<CsvValue>>>
where
    R: io::Read,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(e.to_string()))?;
    rows_from_str(&input, options)
}

/// Encodes a structural event stream.
///
/// Accepts either bare record events or a stream wrapped in one outer
/// array (the shape [`events_from_str`] produces); a detected wrapper is
/// stripped so decode output feeds straight back into encode.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{events_from_str, events_to_string, CsvOptions};
///
/// let options = CsvOptions::new().with_line_terminator("\n");
/// let events = events_from_str("1,x\n2,y\n", options.clone()).unwrap();
/// let text = events_to_string(events, options).unwrap();
/// assert_eq!(text, "1,x\n2,y\n");
/// ```
///
/// # Errors
///
/// Returns an error for invalid options or an illegal event sequence.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn events_to_string(
    events: impl IntoIterator<Item = CsvEvent>,
    options: CsvOptions,
) -> Result<String> {
    encode_events(CsvWriter::new(options)?, events)
}

/// Encodes a structural event stream with a bound schema, resolving
/// field-name events and emitting a header when configured.
///
/// # Errors
///
/// Returns an error for invalid options, an illegal event sequence, or an
/// unresolvable field name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn events_to_string_with_schema(
    events: impl IntoIterator<Item = CsvEvent>,
    schema: CsvSchema,
    options: CsvOptions,
) -> Result<String> {
    encode_events(CsvWriter::with_schema(options, schema)?, events)
}

fn encode_events(
    mut writer: CsvWriter,
    events: impl IntoIterator<Item = CsvEvent>,
) -> Result<String> {
    let events: Vec<CsvEvent> = events.into_iter().collect();
    for event in strip_stream_wrapper(&events) {
        writer.write_event(event)?;
    }
    Ok(writer.finish())
}

/// A decode-side stream is one outer array of records; records themselves
/// start with a nested start event.
fn strip_stream_wrapper(events: &[CsvEvent]) -> &[CsvEvent] {
    if events.len() >= 2
        && events[0] == CsvEvent::StartArray
        && events[1].is_start()
        && events[events.len() - 1] == CsvEvent::EndArray
    {
        &events[1..events.len() - 1]
    } else {
        events
    }
}

/// Decodes delimited text into its structural event stream.
///
/// The stream is one outer array wrapping array-of-arrays or
/// array-of-objects records per [`CsvOptions::wrap_as_array`].
///
/// # Errors
///
/// Returns an error for invalid options or malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn events_from_str(input: &str, options: CsvOptions) -> Result<Vec<CsvEvent>> {
    CsvReader::new(input, options)?.collect()
}

/// Decodes delimited text into its structural event stream with a bound
/// schema (required for object-wrapped emission without a header).
///
/// # Errors
///
/// Returns an error for invalid options or malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn events_from_str_with_schema(
    input: &str,
    schema: CsvSchema,
    options: CsvOptions,
) -> Result<Vec<CsvEvent>> {
    CsvReader::with_schema(input, options, schema)?.collect()
}
