//! Dynamic value representation for TJSON data.
//!
//! This module provides the [`TjsonValue`] enum which represents any value a
//! TJSON document can carry. JSON only knows null, booleans, numbers, strings,
//! arrays and objects; TJSON adds distinct text and binary strings, 64-bit
//! signed and unsigned integers and UTC timestamps, all written as tagged JSON
//! strings.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_tjson::TjsonValue;
//!
//! let text = TjsonValue::from("hello");
//! let bytes = TjsonValue::from(&b"\x00\x01"[..]);
//! let signed = TjsonValue::from(-42i64);
//! let unsigned = TjsonValue::from(42u64);
//! let float = TjsonValue::from(4.5);
//!
//! assert!(text.is_string());
//! assert!(bytes.is_binary());
//! assert!(signed.is_signed_int());
//! assert!(unsigned.is_unsigned_int());
//! assert!(float.is_float());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use serde_tjson::TjsonValue;
//! use std::convert::TryFrom;
//!
//! let value = TjsonValue::from(42u64);
//! assert_eq!(value.as_u64(), Some(42));
//! assert_eq!(i64::try_from(value).unwrap(), 42);
//! ```

use chrono::{DateTime, Timelike, Utc};

use crate::TjsonMap;

/// A dynamically-typed representation of any TJSON value.
///
/// Untagged JSON numbers always decode to [`TjsonValue::Float`]; integers only
/// come from the `i:` and `u:` tags.
///
/// `Null` and `Bool` have no tag. They pass through decoding and encoding
/// unchanged unless strict mode is enabled in [`crate::TjsonOptions`].
///
/// # Examples
///
/// ```rust
/// use serde_tjson::{decode, TjsonValue};
///
/// let value = decode(r#"["s:text", "u:7", 7]"#).unwrap();
/// assert_eq!(
///     value,
///     TjsonValue::Array(vec![
///         TjsonValue::String("text".to_string()),
///         TjsonValue::UnsignedInt(7),
///         TjsonValue::Float(7.0),
///     ])
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum TjsonValue {
    #[default]
    Null,
    Bool(bool),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    SignedInt(i64),
    UnsignedInt(u64),
    Timestamp(DateTime<Utc>),
    Array(Vec<TjsonValue>),
    Object(TjsonMap),
}

impl TjsonValue {
    /// A short name for the kind of this value, used in error messages.
    ///
    /// ```rust
    /// use serde_tjson::TjsonValue;
    ///
    /// assert_eq!(TjsonValue::from("x").kind(), "text");
    /// assert_eq!(TjsonValue::from(1u64).kind(), "unsigned integer");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            TjsonValue::Null => "null",
            TjsonValue::Bool(_) => "boolean",
            TjsonValue::Float(_) => "float",
            TjsonValue::String(_) => "text",
            TjsonValue::Binary(_) => "binary",
            TjsonValue::SignedInt(_) => "signed integer",
            TjsonValue::UnsignedInt(_) => "unsigned integer",
            TjsonValue::Timestamp(_) => "timestamp",
            TjsonValue::Array(_) => "array",
            TjsonValue::Object(_) => "object",
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, TjsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, TjsonValue::Bool(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, TjsonValue::Float(_))
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TjsonValue::String(_))
    }

    /// Returns `true` if the value is binary data.
    #[inline]
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, TjsonValue::Binary(_))
    }

    /// Returns `true` if the value is a signed integer.
    #[inline]
    #[must_use]
    pub const fn is_signed_int(&self) -> bool {
        matches!(self, TjsonValue::SignedInt(_))
    }

    /// Returns `true` if the value is an unsigned integer.
    #[inline]
    #[must_use]
    pub const fn is_unsigned_int(&self) -> bool {
        matches!(self, TjsonValue::UnsignedInt(_))
    }

    /// Returns `true` if the value is a timestamp.
    #[inline]
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, TjsonValue::Timestamp(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TjsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, TjsonValue::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TjsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    ///
    /// Integers are not converted; TJSON keeps the two apart.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TjsonValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TjsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is binary data, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TjsonValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is an integer that fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tjson::TjsonValue;
    ///
    /// assert_eq!(TjsonValue::SignedInt(-1).as_i64(), Some(-1));
    /// assert_eq!(TjsonValue::UnsignedInt(1).as_i64(), Some(1));
    /// assert_eq!(TjsonValue::UnsignedInt(u64::MAX).as_i64(), None);
    /// assert_eq!(TjsonValue::Float(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TjsonValue::SignedInt(i) => Some(*i),
            TjsonValue::UnsignedInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Returns the value as a `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            TjsonValue::UnsignedInt(u) => Some(*u),
            TjsonValue::SignedInt(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// If the value is a timestamp, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            TjsonValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<TjsonValue>> {
        match self {
            TjsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&TjsonMap> {
        match self {
            TjsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

fn mismatch(expected: &str, value: &TjsonValue) -> crate::Error {
    crate::Error::custom(format!("expected {}, found {}", expected, value.kind()))
}

// TryFrom implementations for extracting values from TjsonValue
impl TryFrom<TjsonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| mismatch("signed integer", &value))
    }
}

impl TryFrom<TjsonValue> for u64 {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        value
            .as_u64()
            .ok_or_else(|| mismatch("unsigned integer", &value))
    }
}

impl TryFrom<TjsonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| mismatch("float", &value))
    }
}

impl TryFrom<TjsonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        value.as_bool().ok_or_else(|| mismatch("boolean", &value))
    }
}

impl TryFrom<TjsonValue> for String {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        match value {
            TjsonValue::String(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl TryFrom<TjsonValue> for Vec<u8> {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        match value {
            TjsonValue::Binary(b) => Ok(b),
            other => Err(mismatch("binary", &other)),
        }
    }
}

impl TryFrom<TjsonValue> for DateTime<Utc> {
    type Error = crate::Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        match value {
            TjsonValue::Timestamp(ts) => Ok(ts),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

// From implementations for creating TjsonValue from primitives
impl From<bool> for TjsonValue {
    fn from(value: bool) -> Self {
        TjsonValue::Bool(value)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TjsonValue {
                fn from(value: $ty) -> Self {
                    TjsonValue::SignedInt(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TjsonValue {
                fn from(value: $ty) -> Self {
                    TjsonValue::UnsignedInt(u64::from(value))
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f32> for TjsonValue {
    fn from(value: f32) -> Self {
        TjsonValue::Float(f64::from(value))
    }
}

impl From<f64> for TjsonValue {
    fn from(value: f64) -> Self {
        TjsonValue::Float(value)
    }
}

impl From<String> for TjsonValue {
    fn from(value: String) -> Self {
        TjsonValue::String(value)
    }
}

impl From<&str> for TjsonValue {
    fn from(value: &str) -> Self {
        TjsonValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for TjsonValue {
    fn from(value: Vec<u8>) -> Self {
        TjsonValue::Binary(value)
    }
}

impl From<&[u8]> for TjsonValue {
    fn from(value: &[u8]) -> Self {
        TjsonValue::Binary(value.to_vec())
    }
}

/// Timestamps carry whole seconds only; any fraction is dropped.
impl From<DateTime<Utc>> for TjsonValue {
    fn from(value: DateTime<Utc>) -> Self {
        TjsonValue::Timestamp(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl From<Vec<TjsonValue>> for TjsonValue {
    fn from(value: Vec<TjsonValue>) -> Self {
        TjsonValue::Array(value)
    }
}

impl From<TjsonMap> for TjsonValue {
    fn from(value: TjsonMap) -> Self {
        TjsonValue::Object(value)
    }
}
