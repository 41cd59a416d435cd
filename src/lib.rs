//! # serde_tjson
//!
//! A Serde-compatible codec for TJSON (Tagged JSON).
//!
//! ## What is TJSON?
//!
//! TJSON is JSON with a richer type system layered on top. Every string carries
//! a short tag that says how to read it, so a document can hold explicit signed
//! and unsigned 64-bit integers, binary data, and UTC timestamps while staying
//! valid JSON that any JSON parser can read.
//!
//! | Tag    | Value                          | Example                     |
//! |--------|--------------------------------|-----------------------------|
//! | `s:`   | UTF-8 text                     | `"s:hello"`                 |
//! | `b16:` | binary, lowercase hex          | `"b16:48656c6c6f"`          |
//! | `b32:` | binary, lowercase base32       | `"b32:jbswy3dp"`            |
//! | `b64:` | binary, URL-safe base64        | `"b64:SGVsbG8"`             |
//! | `i:`   | signed 64-bit integer          | `"i:-42"`                   |
//! | `u:`   | unsigned 64-bit integer        | `"u:42"`                    |
//! | `t:`   | UTC timestamp, whole seconds   | `"t:2016-10-02T07:31:51Z"`  |
//!
//! Untagged JSON numbers are always floats, object member names are tagged
//! text or binary, and a document's root is always an array or an object.
//!
//! ## Key Features
//!
//! - **Strict**: non-canonical input (padding, uppercase, stray characters,
//!   out-of-range integers, repeated member names) is rejected outright
//! - **Serde Compatible**: any `#[derive(Serialize, Deserialize)]` type can be
//!   written and read, keeping integer signedness intact
//! - **Dynamic Values**: [`TjsonValue`] models every TJSON value directly
//! - **Stable Errors**: error messages are fixed strings that callers can match
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tjson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     balance: i64,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), balance: -5 };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"{"s:id":"u:123","s:name":"s:Alice","s:balance":"i:-5"}"#);
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Decoding Without a Schema
//!
//! ```rust
//! use serde_tjson::{decode, TjsonValue};
//!
//! let value = decode(r#"["u:18446744073709551615", "b32:mzxw6", 1]"#).unwrap();
//! assert_eq!(
//!     value,
//!     TjsonValue::Array(vec![
//!         TjsonValue::UnsignedInt(u64::MAX),
//!         TjsonValue::Binary(b"foo".to_vec()),
//!         TjsonValue::Float(1.0),
//!     ])
//! );
//! ```
//!
//! ### Building Values with the tjson! Macro
//!
//! ```rust
//! use serde_tjson::{encode, tjson};
//!
//! let data = tjson!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! assert_eq!(
//!     encode(&data).unwrap(),
//!     r#"{"s:name":"s:Alice","s:tags":["s:rust","s:serde"]}"#
//! );
//! ```
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: rejected documents at `debug`
//! level and per-call summaries at `trace` level. Nothing is printed unless
//! the application installs a logger.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - Every decode and encode call is a pure function of its input, safe to
//!   run concurrently from any number of threads
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed round trip through TJSON text
//! - **`macro.rs`** - Building values with the tjson! macro
//! - **`dynamic_values.rs`** - Inspecting decoded values
//! - **`custom_options.rs`** - Strict mode
//!
//! Run any example with: `cargo run --example <name>`

pub mod binary;
pub mod de;
pub mod error;
pub mod integer;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod tag;
pub mod timestamp;
pub mod tree;
pub mod value;

pub use de::{from_value, Decoder, ValueDeserializer};
pub use error::{Error, Result};
pub use map::{Key, TjsonMap};
pub use options::TjsonOptions;
pub use ser::{to_value, Encoder, ValueSerializer};
pub use value::TjsonValue;

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Decode TJSON text into a [`TjsonValue`].
///
/// # Examples
///
/// ```rust
/// use serde_tjson::{decode, TjsonValue};
///
/// assert_eq!(
///     decode(r#"["i:-42"]"#).unwrap(),
///     TjsonValue::Array(vec![TjsonValue::SignedInt(-42)])
/// );
/// assert!(decode(r#""s:not a container""#).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the text is not JSON and [`Error::Parse`] if
/// it is JSON but not TJSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str) -> Result<TjsonValue> {
    decode_with_options(text, TjsonOptions::default())
}

/// Decode TJSON text with custom options.
///
/// # Errors
///
/// Same as [`decode`], plus untagged literals in strict mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(text: &str, options: TjsonOptions) -> Result<TjsonValue> {
    Decoder::new(options).decode(text)
}

/// Encode a [`TjsonValue`] as compact TJSON text.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::{encode, TjsonValue};
///
/// let value = TjsonValue::Array(vec![TjsonValue::UnsignedInt(7), TjsonValue::Float(1.5)]);
/// assert_eq!(encode(&value).unwrap(), r#"["u:7",1.5]"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] if the value has no TJSON form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &TjsonValue) -> Result<String> {
    encode_with_options(value, TjsonOptions::default())
}

/// Encode a [`TjsonValue`] with custom options.
///
/// # Errors
///
/// Same as [`encode`], plus untagged literals in strict mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &TjsonValue, options: TjsonOptions) -> Result<String> {
    Encoder::new(options).encode(value)
}

/// Serialize any `T: Serialize` to a TJSON string.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), r#"{"s:x":"i:1","s:y":"i:2"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, including a root that
/// is not a sequence, map or struct.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, TjsonOptions::default())
}

/// Serialize any `T: Serialize` to a TJSON string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: TjsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Encoder::new(options).encode(&to_value(value)?)
}

/// Serialize any `T: Serialize` to TJSON bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serialize any `T: Serialize` to a writer in TJSON format.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1u8, 2]).unwrap();
/// assert_eq!(buffer, br#"["u:1","u:2"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TJSON text.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"{"s:x":"i:1","s:y":"i:2"}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TJSON or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s)?)
}

/// Deserialize an instance of type `T` from bytes of TJSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TJSON, or do
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of TJSON.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(br#"["u:1","u:2"]"#);
/// let values: Vec<u64> = from_reader(cursor).unwrap();
/// assert_eq!(values, vec![1, 2]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TJSON, or the data does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Envelope {
        id: u64,
        skew: i32,
        body: Option<String>,
        #[serde(with = "bytes_field")]
        digest: Vec<u8>,
    }

    mod bytes_field {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(bytes)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<u8>, D::Error> {
            Vec::<u8>::deserialize(deserializer)
        }
    }

    #[test]
    fn test_typed_round_trip() {
        let envelope = Envelope {
            id: u64::MAX,
            skew: -3,
            body: None,
            digest: vec![0xde, 0xad],
        };
        let text = to_string(&envelope).unwrap();
        assert_eq!(
            text,
            r#"{"s:id":"u:18446744073709551615","s:skew":"i:-3","s:body":null,"s:digest":"b64:3q0"}"#
        );
        assert_eq!(from_str::<Envelope>(&text).unwrap(), envelope);
        assert_eq!(from_slice::<Envelope>(text.as_bytes()).unwrap(), envelope);
    }

    #[test]
    fn test_typed_root_must_be_container() {
        let err = to_string(&5u8).unwrap_err();
        assert!(err.is_encode());
        let err = from_str::<u8>(r#""u:5""#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(from_slice::<Vec<u8>>(&[b'[', 0xff, b']']).is_err());
    }

    #[test]
    fn test_to_writer_matches_to_vec() {
        let data = vec!["a", "b"];
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &data).unwrap();
        assert_eq!(buffer, to_vec(&data).unwrap());
    }

    #[test]
    fn test_strict_options_through_entry_points() {
        assert!(decode_with_options("[1]", TjsonOptions::strict()).is_ok());
        assert!(to_string_with_options(&vec![Some(1u8), None], TjsonOptions::strict()).is_err());
    }
}
