//! Error types for CSV encoding and decoding.
//!
//! All failures surface synchronously through a single [`Error`] enum; nothing
//! is swallowed or retried internally.
//!
//! ## Error Categories
//!
//! - **Configuration**: contradictory or incomplete setup (header requested
//!   with no schema, separator colliding with the quote character). Fatal at
//!   construction time.
//! - **Schema Resolution**: a field name that the bound schema does not know.
//!   Fatal to the current write; already-flushed rows are untouched.
//! - **Structural**: the event sequence itself is illegal (value written with
//!   no open row, mismatched end event). These indicate caller bugs and are
//!   not recoverable by retry.
//! - **Decode Format**: malformed input text (unterminated quoted field,
//!   digit run that is not a number). Carries the line and byte offset so a
//!   caller may skip the offending record and resume at the next row
//!   boundary; this crate does not perform that skip itself.
//! - **Io**: reader/writer failures at the stream boundary functions.
//!
//! ## Examples
//!
//! ```rust
//! use flatcsv::{rows_from_str, CsvOptions, Error};
//!
//! let result = rows_from_str("\"unterminated", CsvOptions::new());
//! assert!(matches!(result, Err(Error::DecodeFormat { .. })));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur during CSV encoding/decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Contradictory or incomplete codec configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A field name the bound schema cannot resolve
    #[error("unrecognized column '{name}': {detail}")]
    SchemaResolution { name: String, detail: String },

    /// An event sequence violation (caller bug, not input data)
    #[error("structural error: {0}")]
    Structural(String),

    /// Malformed input text, with position for caller-side recovery
    #[error("malformed input at line {line}, byte offset {offset}: {msg}")]
    DecodeFormat {
        line: usize,
        offset: usize,
        msg: String,
    },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a configuration error, reported at setup time.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Creates a schema resolution error for an unknown field name.
    ///
    /// `detail` should name the known columns to aid debugging, e.g.
    /// `known columns: "age", "name"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::Error;
    ///
    /// let err = Error::schema_resolution("agee", "known columns: \"age\", \"name\"");
    /// assert!(err.to_string().contains("unrecognized column 'agee'"));
    /// ```
    pub fn schema_resolution(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::SchemaResolution {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Creates a structural error for an illegal event sequence.
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::Structural(msg.into())
    }

    /// Creates a decode error with 1-based line and byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::Error;
    ///
    /// let err = Error::decode(3, 17, "unterminated quoted field");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn decode(line: usize, offset: usize, msg: impl Into<String>) -> Self {
        Error::DecodeFormat {
            line,
            offset,
            msg: msg.into(),
        }
    }

    /// Creates an I/O error for stream boundary failures.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// Rewrites the position of a [`Error::DecodeFormat`] error.
    ///
    /// Field-level decoding works on slices and reports positions relative to
    /// the field start; the row reader uses this to re-anchor them to the
    /// whole input. Other variants pass through unchanged.
    #[must_use]
    pub(crate) fn at(self, line: usize, offset: usize) -> Self {
        match self {
            Error::DecodeFormat { msg, offset: rel, .. } => Error::DecodeFormat {
                line,
                offset: offset + rel,
                msg,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
