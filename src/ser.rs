//! TJSON serialization.
//!
//! This module turns a [`TjsonValue`] tree into TJSON text, and any Rust type
//! implementing `Serialize` into a [`TjsonValue`].
//!
//! ## Overview
//!
//! Encoding rewrites every richer value into a tagged JSON string and hands
//! the result to `serde_json` for printing:
//!
//! - **Text**: `s:` prefix
//! - **Binary**: always `b64:` with URL-safe, unpadded base64, whichever
//!   encoding the value was decoded from
//! - **Integers**: `i:` for signed, `u:` for unsigned
//! - **Timestamps**: `t:` with `YYYY-MM-DDTHH:MM:SSZ`
//! - **Floats**: bare JSON numbers
//!
//! The root must be an array or an object. Output is compact JSON with object
//! members in insertion order.
//!
//! ## Usage
//!
//! ```rust
//! use serde_tjson::{encode, tjson};
//!
//! let value = tjson!({ "id": 7u64, "blob": (vec![0u8, 1]) });
//! assert_eq!(encode(&value).unwrap(), r#"{"s:id":"u:7","s:blob":"b64:AAE"}"#);
//! ```
//!
//! ## Typed values
//!
//! [`to_value`] maps Rust data onto the TJSON value model. Signed integer
//! types become signed integers and unsigned types become unsigned integers,
//! so a round trip through TJSON keeps both the value and the signedness.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_tjson::to_string;
//!
//! #[derive(Serialize)]
//! struct Reading { sensor: u16, delta: i32, value: f64 }
//!
//! let text = to_string(&Reading { sensor: 3, delta: -4, value: 0.5 }).unwrap();
//! assert_eq!(text, r#"{"s:sensor":"u:3","s:delta":"i:-4","s:value":0.5}"#);
//! ```

use log::{debug, trace};
use serde::{ser, Serialize};

use crate::binary::BinaryEncoding;
use crate::error::{NON_CONTAINER_TOPLEVEL, UNTAGGED_LITERAL};
use crate::tag::Tag;
use crate::tree::JsonNode;
use crate::{timestamp, Error, Key, Result, TjsonMap, TjsonOptions, TjsonValue};

const NON_FINITE_FLOAT: &str = "Non-finite float values are not representable";

/// The TJSON encoder.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    options: TjsonOptions,
}

impl Encoder {
    #[must_use]
    pub fn new(options: TjsonOptions) -> Self {
        Encoder { options }
    }

    /// Encodes a value tree as compact TJSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] for a non-container root, a member name that
    /// is not text or binary, a non-finite float, a timestamp outside years
    /// 0001-9999, or an untagged literal in strict mode.
    pub fn encode(&self, value: &TjsonValue) -> Result<String> {
        let tree = self.encode_tree(value)?;
        let text = tree.to_json_string()?;
        trace!("encoded {} value as {} bytes", value.kind(), text.len());
        Ok(text)
    }

    /// Rewrites a value tree into the plain JSON tree that gets printed.
    ///
    /// # Errors
    ///
    /// Same as [`Encoder::encode`].
    pub fn encode_tree(&self, value: &TjsonValue) -> Result<JsonNode> {
        if !(value.is_array() || value.is_object()) {
            debug!("refusing to encode a {} root", value.kind());
            return Err(Error::encode(NON_CONTAINER_TOPLEVEL));
        }
        self.pack(value)
    }

    fn pack(&self, value: &TjsonValue) -> Result<JsonNode> {
        match value {
            TjsonValue::Null | TjsonValue::Bool(_) if self.options.strict => {
                Err(Error::encode(UNTAGGED_LITERAL))
            }
            TjsonValue::Null => Ok(JsonNode::Null),
            TjsonValue::Bool(b) => Ok(JsonNode::Bool(*b)),
            TjsonValue::Float(f) if !f.is_finite() => Err(Error::encode(NON_FINITE_FLOAT)),
            TjsonValue::Float(f) => Ok(JsonNode::Number(*f)),
            TjsonValue::String(s) => Ok(JsonNode::String(tagged(Tag::String, s))),
            TjsonValue::Binary(b) => Ok(JsonNode::String(pack_binary(b))),
            TjsonValue::SignedInt(i) => Ok(JsonNode::String(tagged(Tag::SignedInt, i))),
            TjsonValue::UnsignedInt(u) => Ok(JsonNode::String(tagged(Tag::UnsignedInt, u))),
            TjsonValue::Timestamp(ts) => {
                let body = timestamp::format(ts)?;
                Ok(JsonNode::String(tagged(Tag::Timestamp, body)))
            }
            TjsonValue::Array(items) => items
                .iter()
                .map(|item| self.pack(item))
                .collect::<Result<Vec<_>>>()
                .map(JsonNode::Array),
            TjsonValue::Object(map) => map
                .iter()
                .map(|(key, value)| Ok((pack_key(key), self.pack(value)?)))
                .collect::<Result<Vec<_>>>()
                .map(JsonNode::Object),
        }
    }
}

fn tagged(tag: Tag, body: impl std::fmt::Display) -> String {
    format!("{}{}", tag.prefix(), body)
}

fn pack_binary(bytes: &[u8]) -> String {
    let encoding = BinaryEncoding::Base64;
    tagged(Tag::Binary(encoding), encoding.encode(bytes))
}

/// Writes a member name as its tagged form.
///
/// ```rust
/// use serde_tjson::{ser::pack_key, Key};
///
/// assert_eq!(pack_key(&Key::from("foo")), "s:foo");
/// assert_eq!(pack_key(&Key::from(b"foo")), "b64:Zm9v");
/// ```
#[must_use]
pub fn pack_key(key: &Key) -> String {
    match key {
        Key::Text(s) => tagged(Tag::String, s),
        Key::Binary(b) => pack_binary(b),
    }
}

/// Converts any `T: Serialize` into a [`TjsonValue`].
///
/// # Errors
///
/// Fails for map keys that are not strings or bytes, and for 128-bit integers
/// outside the 64-bit ranges.
pub fn to_value<T>(value: &T) -> Result<TjsonValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializer whose output is a [`TjsonValue`].
///
/// Enums are externally tagged: unit variants become text, every other variant
/// becomes a single-member object named after the variant.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<TjsonValue>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<TjsonValue>,
}

pub struct SerializeMap {
    map: TjsonMap,
    current_key: Option<Key>,
}

pub struct SerializeStructVariant {
    name: String,
    map: TjsonMap,
}

fn variant_object(name: String, value: TjsonValue) -> TjsonValue {
    let mut map = TjsonMap::with_capacity(1);
    map.insert(Key::Text(name), value);
    TjsonValue::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = TjsonValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<TjsonValue> {
        Ok(TjsonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<TjsonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<TjsonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<TjsonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<TjsonValue> {
        Ok(TjsonValue::SignedInt(v))
    }

    fn serialize_i128(self, v: i128) -> Result<TjsonValue> {
        i64::try_from(v).map(TjsonValue::SignedInt).map_err(|_| {
            let bound = if v < 0 { "undersized" } else { "oversized" };
            Error::encode(format!("{} integer: {}", bound, v))
        })
    }

    fn serialize_u8(self, v: u8) -> Result<TjsonValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<TjsonValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<TjsonValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<TjsonValue> {
        Ok(TjsonValue::UnsignedInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<TjsonValue> {
        u64::try_from(v)
            .map(TjsonValue::UnsignedInt)
            .map_err(|_| Error::encode(format!("oversized integer: {}", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<TjsonValue> {
        Ok(TjsonValue::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<TjsonValue> {
        Ok(TjsonValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<TjsonValue> {
        Ok(TjsonValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<TjsonValue> {
        Ok(TjsonValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<TjsonValue> {
        Ok(TjsonValue::Binary(v.to_vec()))
    }

    fn serialize_none(self) -> Result<TjsonValue> {
        Ok(TjsonValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<TjsonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<TjsonValue> {
        Ok(TjsonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<TjsonValue> {
        Ok(TjsonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<TjsonValue> {
        Ok(TjsonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<TjsonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<TjsonValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_object(variant.to_string(), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: TjsonMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: TjsonMap::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TjsonValue> {
        Ok(TjsonValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<TjsonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<TjsonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TjsonValue> {
        Ok(variant_object(self.name, TjsonValue::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(Key::try_from(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TjsonValue> {
        Ok(TjsonValue::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Key::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TjsonValue> {
        Ok(TjsonValue::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = TjsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Key::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TjsonValue> {
        Ok(variant_object(self.name, TjsonValue::Object(self.map)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn encode(value: &TjsonValue) -> Result<String> {
        Encoder::default().encode(value)
    }

    fn object(members: Vec<(Key, TjsonValue)>) -> TjsonValue {
        TjsonValue::Object(members.into_iter().collect())
    }

    #[test]
    fn test_pack_scalars() {
        let value = TjsonValue::Array(vec![
            TjsonValue::from("hi"),
            TjsonValue::SignedInt(-5),
            TjsonValue::UnsignedInt(u64::MAX),
            TjsonValue::Float(0.25),
            TjsonValue::Binary(b"Hello, world!".to_vec()),
            TjsonValue::Timestamp(Utc.with_ymd_and_hms(2016, 10, 2, 7, 31, 51).unwrap()),
        ]);
        assert_eq!(
            encode(&value).unwrap(),
            r#"["s:hi","i:-5","u:18446744073709551615",0.25,"b64:SGVsbG8sIHdvcmxkIQ","t:2016-10-02T07:31:51Z"]"#
        );
    }

    #[test]
    fn test_pack_member_names() {
        let value = object(vec![
            (Key::from("foo"), TjsonValue::from(1.5)),
            (Key::from(b"foo"), TjsonValue::Array(vec![])),
        ]);
        assert_eq!(encode(&value).unwrap(), r#"{"s:foo":1.5,"b64:Zm9v":[]}"#);
    }

    #[test]
    fn test_toplevel_rule() {
        for value in [
            TjsonValue::from("x"),
            TjsonValue::SignedInt(1),
            TjsonValue::Null,
            TjsonValue::Float(1.0),
        ] {
            let err = encode(&value).unwrap_err();
            assert!(err.is_encode());
            assert_eq!(
                err.to_string(),
                "Toplevel elements other than object or array are disallowed"
            );
        }
    }

    #[test]
    fn test_non_finite_floats() {
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = encode(&TjsonValue::Array(vec![TjsonValue::Float(f)])).unwrap_err();
            assert_eq!(err, Error::encode(NON_FINITE_FLOAT));
        }
    }

    #[test]
    fn test_strict_encode() {
        let encoder = Encoder::new(TjsonOptions::strict());
        let err = encoder
            .encode(&TjsonValue::Array(vec![TjsonValue::Null]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Untagged null and boolean values are disallowed");

        let default = Encoder::default();
        assert_eq!(
            default
                .encode(&TjsonValue::Array(vec![TjsonValue::Null, TjsonValue::Bool(false)]))
                .unwrap(),
            "[null,false]"
        );
    }

    #[test]
    fn test_to_value_integer_kinds() {
        assert_eq!(to_value(&-1i8).unwrap(), TjsonValue::SignedInt(-1));
        assert_eq!(to_value(&7u16).unwrap(), TjsonValue::UnsignedInt(7));
        assert_eq!(to_value(&5i128).unwrap(), TjsonValue::SignedInt(5));
        assert!(to_value(&(u128::from(u64::MAX) + 1)).unwrap_err().is_encode());
    }

    #[test]
    fn test_to_value_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1u32, "one");
        let err = to_value(&map).unwrap_err();
        assert_eq!(err.to_string(), "Object member names must be text or binary");

        let mut map = BTreeMap::new();
        map.insert("k", 1u8);
        assert_eq!(
            to_value(&map).unwrap(),
            object(vec![(Key::from("k"), TjsonValue::UnsignedInt(1))])
        );
    }

    #[test]
    fn test_to_value_enums() {
        #[derive(Serialize)]
        enum Op {
            Halt,
            Push(i32),
            Move(u8, u8),
            Jump { to: u64 },
        }

        let ops = to_value(&vec![Op::Halt, Op::Push(-1), Op::Move(1, 2), Op::Jump { to: 9 }])
            .unwrap();
        assert_eq!(
            ops,
            TjsonValue::Array(vec![
                TjsonValue::from("Halt"),
                object(vec![(Key::from("Push"), TjsonValue::SignedInt(-1))]),
                object(vec![(
                    Key::from("Move"),
                    TjsonValue::Array(vec![TjsonValue::UnsignedInt(1), TjsonValue::UnsignedInt(2)])
                )]),
                object(vec![(
                    Key::from("Jump"),
                    object(vec![(Key::from("to"), TjsonValue::UnsignedInt(9))])
                )]),
            ])
        );
    }
}
