//! TJSON deserialization.
//!
//! This module turns TJSON text into a [`TjsonValue`] tree and, from there,
//! into any Rust type implementing `Deserialize`.
//!
//! ## Overview
//!
//! Decoding runs in a fixed order and stops at the first violation:
//!
//! 1. The text is parsed as plain JSON, keeping object members as raw pairs
//! 2. Member names repeated within one object are rejected
//! 3. The root must be an array or an object
//! 4. Every string is split into tag and body and converted; every number
//!    becomes a float; object member names must decode to text or binary and
//!    must be unique after decoding
//!
//! ## Usage
//!
//! ```rust
//! use serde_tjson::{decode, Key, TjsonValue};
//!
//! let value = decode(r#"{"b16:48656c6c6f2c20776f726c6421":"s:foobar"}"#).unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(
//!     object.get(&Key::from(&b"Hello, world!"[..])),
//!     Some(&TjsonValue::String("foobar".to_string()))
//! );
//! ```

use chrono::SecondsFormat;
use log::{debug, trace};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

use crate::error::{INVALID_MEMBER_NAME, NON_CONTAINER_TOPLEVEL, UNTAGGED_LITERAL};
use crate::tag::{self, Tag};
use crate::tree::JsonNode;
use crate::{integer, timestamp, Error, Key, Result, TjsonMap, TjsonOptions, TjsonValue};

/// The TJSON decoder.
///
/// Holds the options for one or more decode calls; it keeps no state between
/// calls.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: TjsonOptions,
}

impl Decoder {
    #[must_use]
    pub fn new(options: TjsonOptions) -> Self {
        Decoder { options }
    }

    /// Decodes TJSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for invalid JSON and [`Error::Parse`] for
    /// valid JSON that is not valid TJSON.
    pub fn decode(&self, text: &str) -> Result<TjsonValue> {
        trace!("decoding {} bytes of TJSON text", text.len());
        let root = JsonNode::parse(text)?;
        self.decode_tree(root)
    }

    /// Decodes an already parsed JSON tree.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::decode`], minus JSON syntax errors.
    pub fn decode_tree(&self, root: JsonNode) -> Result<TjsonValue> {
        if let Some(name) = root.first_duplicate_member() {
            debug!("rejecting document with repeated member name {:?}", name);
            return Err(Error::parse(format!("Duplicate key: '{}'", name)));
        }
        if !root.is_container() {
            debug!("rejecting document with a non-container root");
            return Err(Error::parse(NON_CONTAINER_TOPLEVEL));
        }
        self.unpack(root)
    }

    fn unpack(&self, node: JsonNode) -> Result<TjsonValue> {
        match node {
            JsonNode::Array(items) => items
                .into_iter()
                .map(|item| self.unpack(item))
                .collect::<Result<Vec<_>>>()
                .map(TjsonValue::Array),
            JsonNode::Object(members) => self.unpack_object(members),
            JsonNode::String(s) => unpack_str(&s),
            JsonNode::Number(n) => Ok(TjsonValue::Float(n)),
            JsonNode::Bool(_) | JsonNode::Null if self.options.strict => {
                Err(Error::parse(UNTAGGED_LITERAL))
            }
            JsonNode::Bool(b) => Ok(TjsonValue::Bool(b)),
            JsonNode::Null => Ok(TjsonValue::Null),
        }
    }

    fn unpack_object(&self, members: Vec<(String, JsonNode)>) -> Result<TjsonValue> {
        let mut map = TjsonMap::with_capacity(members.len());
        for (name, node) in members {
            let key = unpack_member_name(&name)?;
            if map.contains_key(&key) {
                debug!("rejecting object with repeated decoded member name {}", key);
                return Err(Error::parse(format!("Duplicate key: {}", key)));
            }
            let value = self.unpack(node)?;
            map.insert(key, value);
        }
        Ok(TjsonValue::Object(map))
    }
}

/// Interprets a single tagged string.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::{de::unpack_str, TjsonValue};
///
/// assert_eq!(unpack_str("u:42").unwrap(), TjsonValue::UnsignedInt(42));
/// assert_eq!(unpack_str("b32:mzxw6").unwrap(), TjsonValue::Binary(b"foo".to_vec()));
/// ```
///
/// # Errors
///
/// Fails on a missing or unknown tag, or an invalid body for the tag.
pub fn unpack_str(s: &str) -> Result<TjsonValue> {
    let (tag, body) = tag::split(s)?;
    match tag {
        Tag::String => Ok(TjsonValue::String(body.to_string())),
        Tag::Binary(encoding) => encoding.decode(body).map(TjsonValue::Binary),
        Tag::SignedInt => integer::parse_signed(body).map(TjsonValue::SignedInt),
        Tag::UnsignedInt => integer::parse_unsigned(body).map(TjsonValue::UnsignedInt),
        Tag::Timestamp => timestamp::parse(body).map(TjsonValue::Timestamp),
    }
}

fn unpack_member_name(name: &str) -> Result<Key> {
    match unpack_str(name)? {
        TjsonValue::String(s) => Ok(Key::Text(s)),
        TjsonValue::Binary(b) => Ok(Key::Binary(b)),
        _ => Err(Error::parse(INVALID_MEMBER_NAME)),
    }
}

/// Deserializes a `T` out of a decoded value tree.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tjson::{decode, from_value};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i64, y: i64 }
///
/// let value = decode(r#"{"s:x":"i:1","s:y":"i:-2"}"#).unwrap();
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
pub fn from_value<T>(value: TjsonValue) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<TjsonValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<TjsonValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Key, TjsonValue>,
    value: Option<TjsonValue>,
}

impl MapDeserializer {
    fn new(map: TjsonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(TjsonValue::from(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<TjsonValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: TjsonValue) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(TjsonValue::String(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<TjsonValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(TjsonValue::Null) | None => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TjsonValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TjsonValue::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

/// Feeds an owned [`TjsonValue`] to a serde visitor.
///
/// Timestamps are presented as RFC 3339 text (`2016-10-02T07:31:51Z`), which
/// `chrono`'s own `Deserialize` impls accept. Binary data is presented as a
/// byte buffer, or as a sequence of bytes when a sequence is requested.
pub struct ValueDeserializer {
    value: TjsonValue,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: TjsonValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TjsonValue::Null => visitor.visit_unit(),
            TjsonValue::Bool(b) => visitor.visit_bool(b),
            TjsonValue::Float(f) => visitor.visit_f64(f),
            TjsonValue::String(s) => visitor.visit_string(s),
            TjsonValue::Binary(b) => visitor.visit_byte_buf(b),
            TjsonValue::SignedInt(i) => visitor.visit_i64(i),
            TjsonValue::UnsignedInt(u) => visitor.visit_u64(u),
            TjsonValue::Timestamp(ts) => {
                visitor.visit_string(ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            TjsonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            TjsonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TjsonValue::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TjsonValue::Binary(bytes) => visitor.visit_seq(SeqDeserializer::new(
                bytes.into_iter().map(TjsonValue::from).collect(),
            )),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TjsonValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            TjsonValue::Object(obj) => {
                let mut members = obj.into_iter();
                match (members.next(), members.next()) {
                    (Some((Key::Text(variant), value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom("Expected enum variant")),
                }
            }
            _ => Err(Error::custom("Expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct tuple
        tuple_struct map struct identifier ignored_any
    }
}
