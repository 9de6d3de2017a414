//! Dynamic scalar values carried by the event stream.
//!
//! This module provides the [`CsvValue`] enum which represents any scalar a
//! row cell can hold, and [`Number`], its numeric payload. The decode side
//! produces these; the encode side accepts them (alongside typed write
//! methods on the writer).
//!
//! ## Core Types
//!
//! - [`CsvValue`]: null, boolean, number, string, or binary cell value
//! - [`Number`]: a 64-bit integer, an arbitrary-precision integer, or a
//!   double
//!
//! ## Canonical text
//!
//! Every value has exactly one textual form used on the wire:
//! integers are decimal digits with an optional leading minus, booleans are
//! `true`/`false`, floats use Rust's shortest round-trippable decimal form,
//! null is the empty field, and binary values are Base64 text.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use flatcsv::{CsvValue, Number};
//!
//! let n = CsvValue::from(42);
//! assert!(n.is_number());
//! assert_eq!(n.as_i64(), Some(42));
//! assert_eq!(n.to_field_text(), "42");
//!
//! let s = CsvValue::from("hello");
//! assert_eq!(s.as_str(), Some("hello"));
//!
//! // Safe extraction with TryFrom
//! let back: i64 = i64::try_from(CsvValue::from(7)).unwrap();
//! assert_eq!(back, 7);
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed scalar cell value.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{CsvValue, Number};
///
/// let null = CsvValue::Null;
/// let num = CsvValue::Number(Number::Int(42));
/// let text = CsvValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CsvValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
}

/// A numeric cell value.
///
/// `Int` covers everything that fits a 64-bit signed integer (the decode
/// side folds 32-bit and 64-bit digit runs into it); `BigInt` holds digit
/// runs past the 64-bit range; `Float` holds doubles. Arbitrary-precision
/// decimals travel as their decimal text via [`CsvValue::String`].
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    BigInt(BigInt),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is a 64-bit integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Returns `true` if this is an arbitrary-precision integer.
    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Number::BigInt(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::Number;
    /// use num_bigint::BigInt;
    ///
    /// assert_eq!(Number::Int(42).as_i64(), Some(42));
    /// assert_eq!(Number::BigInt(BigInt::from(42)).as_i64(), Some(42));
    /// assert_eq!(Number::Float(1.5).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::BigInt(bi) => i64::try_from(bi.clone()).ok(),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64` where that loses no structure.
    ///
    /// `BigInt` values return `None` rather than silently rounding.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(i) => Some(*i as f64),
            Number::Float(f) => Some(*f),
            Number::BigInt(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::BigInt(bi) => write!(f, "{}", bi),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl CsvValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, CsvValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, CsvValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, CsvValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, CsvValue::String(_))
    }

    /// Returns `true` if the value is binary.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, CsvValue::Bytes(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CsvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CsvValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a number fitting an `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CsvValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number representable as `f64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CsvValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// If the value is an arbitrary-precision integer, returns it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            CsvValue::Number(Number::BigInt(bi)) => Some(bi),
            _ => None,
        }
    }

    /// If the value is binary, returns the raw bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CsvValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The canonical text this value puts on the wire, before quoting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::CsvValue;
    ///
    /// assert_eq!(CsvValue::Null.to_field_text(), "");
    /// assert_eq!(CsvValue::from(true).to_field_text(), "true");
    /// assert_eq!(CsvValue::from(-3).to_field_text(), "-3");
    /// assert_eq!(CsvValue::from(2.5).to_field_text(), "2.5");
    /// assert_eq!(CsvValue::Bytes(vec![1, 2, 3]).to_field_text(), "AQID");
    /// ```
    #[must_use]
    pub fn to_field_text(&self) -> String {
        match self {
            CsvValue::Null => String::new(),
            CsvValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CsvValue::Number(n) => n.to_string(),
            CsvValue::String(s) => s.clone(),
            CsvValue::Bytes(b) => BASE64.encode(b),
        }
    }
}

impl fmt::Display for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvValue::Null => write!(f, "null"),
            CsvValue::Bool(b) => write!(f, "{}", b),
            CsvValue::Number(n) => write!(f, "{}", n),
            CsvValue::String(s) => write!(f, "{}", s),
            CsvValue::Bytes(b) => write!(f, "{}", BASE64.encode(b)),
        }
    }
}

impl Serialize for CsvValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CsvValue::Null => serializer.serialize_unit(),
            CsvValue::Bool(b) => serializer.serialize_bool(*b),
            CsvValue::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            CsvValue::Number(Number::BigInt(bi)) => serializer.serialize_str(&bi.to_string()),
            CsvValue::Number(Number::Float(fl)) => serializer.serialize_f64(*fl),
            CsvValue::String(s) => serializer.serialize_str(s),
            CsvValue::Bytes(b) => serializer.serialize_bytes(b),
        }
    }
}

impl<'de> Deserialize<'de> for CsvValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct CsvValueVisitor;

        impl<'de> Visitor<'de> for CsvValueVisitor {
            type Value = CsvValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar cell value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(CsvValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(CsvValue::Number(Number::Int(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(CsvValue::Number(Number::Int(value as i64)))
                } else {
                    Ok(CsvValue::Number(Number::BigInt(BigInt::from(value))))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(CsvValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(CsvValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(CsvValue::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(CsvValue::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(CsvValue::Bytes(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(CsvValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(CsvValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(CsvValueVisitor)
    }
}

// TryFrom implementations for extracting values from CsvValue
impl TryFrom<CsvValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: CsvValue) -> crate::Result<Self> {
        match value {
            CsvValue::Number(ref n) => n.as_i64().ok_or_else(|| {
                crate::Error::structural(format!("number {} does not fit an i64", n))
            }),
            _ => Err(crate::Error::structural(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<CsvValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: CsvValue) -> crate::Result<Self> {
        match value {
            CsvValue::Number(ref n) => n.as_f64().ok_or_else(|| {
                crate::Error::structural(format!("number {} is not representable as f64", n))
            }),
            _ => Err(crate::Error::structural(format!(
                "expected number, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<CsvValue> for bool {
    type Error = crate::Error;

    fn try_from(value: CsvValue) -> crate::Result<Self> {
        match value {
            CsvValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::structural(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<CsvValue> for String {
    type Error = crate::Error;

    fn try_from(value: CsvValue) -> crate::Result<Self> {
        match value {
            CsvValue::String(s) => Ok(s),
            _ => Err(crate::Error::structural(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

// From implementations for creating CsvValue from primitives
impl From<bool> for CsvValue {
    fn from(value: bool) -> Self {
        CsvValue::Bool(value)
    }
}

impl From<i8> for CsvValue {
    fn from(value: i8) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<i16> for CsvValue {
    fn from(value: i16) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<i32> for CsvValue {
    fn from(value: i32) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<i64> for CsvValue {
    fn from(value: i64) -> Self {
        CsvValue::Number(Number::Int(value))
    }
}

impl From<u8> for CsvValue {
    fn from(value: u8) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<u16> for CsvValue {
    fn from(value: u16) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<u32> for CsvValue {
    fn from(value: u32) -> Self {
        CsvValue::Number(Number::Int(value as i64))
    }
}

impl From<u64> for CsvValue {
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            CsvValue::Number(Number::Int(value as i64))
        } else {
            CsvValue::Number(Number::BigInt(BigInt::from(value)))
        }
    }
}

impl From<f32> for CsvValue {
    fn from(value: f32) -> Self {
        CsvValue::Number(Number::Float(value as f64))
    }
}

impl From<f64> for CsvValue {
    fn from(value: f64) -> Self {
        CsvValue::Number(Number::Float(value))
    }
}

impl From<BigInt> for CsvValue {
    fn from(value: BigInt) -> Self {
        CsvValue::Number(Number::BigInt(value))
    }
}

impl From<String> for CsvValue {
    fn from(value: String) -> Self {
        CsvValue::String(value)
    }
}

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for CsvValue {
    fn from(value: Vec<u8>) -> Self {
        CsvValue::Bytes(value)
    }
}

impl From<&[u8]> for CsvValue {
    fn from(value: &[u8]) -> Self {
        CsvValue::Bytes(value.to_vec())
    }
}

impl<T> From<Option<T>> for CsvValue
where
    T: Into<CsvValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CsvValue::Null,
        }
    }
}
