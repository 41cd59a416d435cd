//! Ordered map type for TJSON objects.
//!
//! This module provides [`TjsonMap`], a wrapper around [`IndexMap`] that keeps
//! object members in insertion order, and [`Key`], the type of a member name.
//!
//! TJSON member names are either text (`s:` tag) or binary (`b16:`, `b32:` or
//! `b64:` tag). The two kinds never compare equal, even when the underlying
//! bytes match: `{"s:foo": 1, "b64:Zm9v": 2}` is an object with two members.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tjson::{Key, TjsonMap, TjsonValue};
//!
//! let mut map = TjsonMap::new();
//! map.insert(Key::from("name"), TjsonValue::from("Alice"));
//! map.insert(Key::from(&b"id"[..]), TjsonValue::from(30u64));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get_text("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(map.get_binary(b"id").and_then(|v| v.as_u64()), Some(30));
//! ```

use indexmap::IndexMap;
use std::fmt;

use crate::error::INVALID_MEMBER_NAME;
use crate::{Error, TjsonValue};

/// An object member name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Text(String),
    Binary(Vec<u8>),
}

impl Key {
    /// Returns the text of a text key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            Key::Binary(_) => None,
        }
    }

    /// Returns the bytes of a binary key.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Key::Text(_) => None,
            Key::Binary(b) => Some(b),
        }
    }
}

/// Renders the key the way diagnostics quote it: `'foo'` for text, `b'foo'`
/// for binary with non-printable bytes escaped.
///
/// ```rust
/// use serde_tjson::Key;
///
/// assert_eq!(Key::from("foo").to_string(), "'foo'");
/// assert_eq!(Key::from(&b"fo\xffo"[..]).to_string(), "b'fo\\xffo'");
/// ```
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => write!(f, "'{}'", s),
            Key::Binary(bytes) => {
                f.write_str("b'")?;
                for &byte in bytes {
                    match byte {
                        b'\\' => f.write_str("\\\\")?,
                        b'\'' => f.write_str("\\'")?,
                        b'\t' => f.write_str("\\t")?,
                        b'\n' => f.write_str("\\n")?,
                        b'\r' => f.write_str("\\r")?,
                        0x20..=0x7e => write!(f, "{}", byte as char)?,
                        _ => write!(f, "\\x{:02x}", byte)?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<&[u8]> for Key {
    fn from(value: &[u8]) -> Self {
        Key::Binary(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(value: &[u8; N]) -> Self {
        Key::Binary(value.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(value: Vec<u8>) -> Self {
        Key::Binary(value)
    }
}

/// Only text and binary values can name an object member.
impl TryFrom<TjsonValue> for Key {
    type Error = Error;

    fn try_from(value: TjsonValue) -> crate::Result<Self> {
        match value {
            TjsonValue::String(s) => Ok(Key::Text(s)),
            TjsonValue::Binary(b) => Ok(Key::Binary(b)),
            _ => Err(Error::encode(INVALID_MEMBER_NAME)),
        }
    }
}

impl From<Key> for TjsonValue {
    fn from(key: Key) -> Self {
        match key {
            Key::Text(s) => TjsonValue::String(s),
            Key::Binary(b) => TjsonValue::Binary(b),
        }
    }
}

/// An insertion-ordered map of member names to TJSON values.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::{Key, TjsonMap, TjsonValue};
///
/// let mut map = TjsonMap::new();
/// map.insert(Key::from("first"), TjsonValue::from(1i64));
/// map.insert(Key::from("second"), TjsonValue::from(2i64));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().filter_map(Key::as_str).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TjsonMap(IndexMap<Key, TjsonValue>);

impl TjsonMap {
    /// Creates an empty `TjsonMap`.
    #[must_use]
    pub fn new() -> Self {
        TjsonMap(IndexMap::new())
    }

    /// Creates an empty `TjsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TjsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a member, returning the previous value for an equal key.
    ///
    /// Replacing keeps the member at its original position.
    pub fn insert(&mut self, key: Key, value: TjsonValue) -> Option<TjsonValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&TjsonValue> {
        self.0.get(key)
    }

    /// Looks up a text member name.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&TjsonValue> {
        self.0.get(&Key::Text(name.to_string()))
    }

    /// Looks up a binary member name.
    #[must_use]
    pub fn get_binary(&self, name: &[u8]) -> Option<&TjsonValue> {
        self.0.get(&Key::Binary(name.to_vec()))
    }

    /// Returns `true` if the map contains a member with this name.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of members in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the member names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, TjsonValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, TjsonValue> {
        self.0.values()
    }

    /// Returns an iterator over the members, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, TjsonValue> {
        self.0.iter()
    }
}

impl IntoIterator for TjsonMap {
    type Item = (Key, TjsonValue);
    type IntoIter = indexmap::map::IntoIter<Key, TjsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TjsonMap {
    type Item = (&'a Key, &'a TjsonValue);
    type IntoIter = indexmap::map::Iter<'a, Key, TjsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, TjsonValue)> for TjsonMap {
    fn from_iter<T: IntoIterator<Item = (Key, TjsonValue)>>(iter: T) -> Self {
        TjsonMap(IndexMap::from_iter(iter))
    }
}
