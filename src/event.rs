//! Structural events exchanged with the document walker.
//!
//! [`CsvEvent`] is the boundary contract of this crate: the encode side
//! consumes a sequence of these events and produces delimited text, the
//! decode side produces the symmetric sequence for a walker to consume.
//!
//! # Examples
//!
//! One array-wrapped record:
//!
//! ```rust
//! use flatcsv::{CsvEvent, CsvValue};
//!
//! let record = vec![
//!     CsvEvent::StartArray,
//!     CsvEvent::Value(CsvValue::from(13)),
//!     CsvEvent::Value(CsvValue::from("Joe")),
//!     CsvEvent::EndArray,
//! ];
//! assert!(record[1].is_value());
//! ```

use crate::CsvValue;

/// One structural event of the document-walker contract.
///
/// Object-wrapped records alternate [`CsvEvent::FieldName`] and
/// [`CsvEvent::Value`] between `StartObject`/`EndObject`; array-wrapped
/// records carry bare values between `StartArray`/`EndArray`.
#[derive(Clone, Debug, PartialEq)]
pub enum CsvEvent {
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    FieldName(String),
    Value(CsvValue),
}

impl CsvEvent {
    /// Returns `true` for a scalar value event.
    #[inline]
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, CsvEvent::Value(_))
    }

    /// Returns `true` for a start-array/start-object event.
    #[inline]
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self, CsvEvent::StartArray | CsvEvent::StartObject)
    }

    /// Returns `true` for an end-array/end-object event.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, CsvEvent::EndArray | CsvEvent::EndObject)
    }

    /// If this is a value event, returns the value.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&CsvValue> {
        match self {
            CsvEvent::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<CsvValue> for CsvEvent {
    fn from(value: CsvValue) -> Self {
        CsvEvent::Value(value)
    }
}
