//! Untyped JSON trees.
//!
//! [`JsonNode`] is the plain JSON layer underneath TJSON. Parsing and
//! printing are delegated to `serde_json`; this module only decides the shape
//! of the tree:
//!
//! - every number becomes an `f64`, whether or not it is written as an integer
//! - object members stay an ordered list of `(name, value)` pairs, duplicates
//!   included, so repeated names can be detected before anything collapses them

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::Result;

/// A JSON value with object members kept as raw, ordered pairs.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonNode>),
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    /// Parses JSON text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tjson::tree::JsonNode;
    ///
    /// let node = JsonNode::parse(r#"{"a": 1, "a": 2}"#).unwrap();
    /// if let JsonNode::Object(members) = node {
    ///     assert_eq!(members.len(), 2);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Syntax`] with the parser's own message.
    pub fn parse(text: &str) -> Result<JsonNode> {
        Ok(serde_json::from_str(text)?)
    }

    /// Writes this tree as compact JSON text.
    ///
    /// # Errors
    ///
    /// Only fails if `serde_json` rejects the tree.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns `true` for arrays and objects.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, JsonNode::Array(_) | JsonNode::Object(_))
    }

    /// Finds the first member name repeated within a single object.
    ///
    /// Nested objects are checked before the object that contains them, in
    /// document order.
    #[must_use]
    pub fn first_duplicate_member(&self) -> Option<&str> {
        match self {
            JsonNode::Array(items) => items.iter().find_map(JsonNode::first_duplicate_member),
            JsonNode::Object(members) => {
                if let Some(name) = members
                    .iter()
                    .find_map(|(_, value)| value.first_duplicate_member())
                {
                    return Some(name);
                }
                let mut seen = HashSet::with_capacity(members.len());
                members
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .find(|name| !seen.insert(*name))
            }
            _ => None,
        }
    }
}

impl Serialize for JsonNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonNode::Null => serializer.serialize_unit(),
            JsonNode::Bool(b) => serializer.serialize_bool(*b),
            JsonNode::Number(n) => serializer.serialize_f64(*n),
            JsonNode::String(s) => serializer.serialize_str(s),
            JsonNode::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonNode::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (name, value) in members {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct JsonNodeVisitor;

        impl<'de> Visitor<'de> for JsonNodeVisitor {
            type Value = JsonNode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<JsonNode, E> {
                Ok(JsonNode::Null)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<JsonNode, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(JsonNode::Array(items))
            }

            // Every member is kept, repeated names included.
            fn visit_map<A>(self, mut map: A) -> std::result::Result<JsonNode, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = Vec::new();
                while let Some((name, value)) = map.next_entry::<String, JsonNode>()? {
                    members.push((name, value));
                }
                Ok(JsonNode::Object(members))
            }
        }

        deserializer.deserialize_any(JsonNodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_floats() {
        assert_eq!(
            JsonNode::parse("[42, -7, 42.5, 18446744073709551616]").unwrap(),
            JsonNode::Array(vec![
                JsonNode::Number(42.0),
                JsonNode::Number(-7.0),
                JsonNode::Number(42.5),
                JsonNode::Number(18446744073709551616.0),
            ])
        );
    }

    #[test]
    fn test_out_of_range_number_is_a_syntax_error() {
        let err = JsonNode::parse("[1e400]").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("number out of range"));
    }

    #[test]
    fn test_keeps_duplicate_members_in_order() {
        let node = JsonNode::parse(r#"{"s:foo":1,"s:bar":2,"s:foo":3}"#).unwrap();
        assert_eq!(
            node,
            JsonNode::Object(vec![
                ("s:foo".to_string(), JsonNode::Number(1.0)),
                ("s:bar".to_string(), JsonNode::Number(2.0)),
                ("s:foo".to_string(), JsonNode::Number(3.0)),
            ])
        );
        assert_eq!(node.first_duplicate_member(), Some("s:foo"));
    }

    #[test]
    fn test_nested_duplicates_found_first() {
        let node = JsonNode::parse(r#"{"a":1,"a":{"b":1,"b":2}}"#).unwrap();
        assert_eq!(node.first_duplicate_member(), Some("b"));

        let node = JsonNode::parse(r#"[{"x":1},[{"y":1,"y":2}]]"#).unwrap();
        assert_eq!(node.first_duplicate_member(), Some("y"));

        let node = JsonNode::parse(r#"{"a":{"b":1},"c":{"b":2}}"#).unwrap();
        assert_eq!(node.first_duplicate_member(), None);
    }

    #[test]
    fn test_syntax_errors_pass_through() {
        let err = JsonNode::parse("[1,").unwrap_err();
        assert!(err.is_syntax());
        let err = JsonNode::parse("{\"a\" 1}").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_to_json_string_keeps_order() {
        let node = JsonNode::Object(vec![
            ("s:b".to_string(), JsonNode::Number(1.0)),
            ("s:a".to_string(), JsonNode::Array(vec![JsonNode::Null, JsonNode::Bool(true)])),
        ]);
        assert_eq!(
            node.to_json_string().unwrap(),
            r#"{"s:b":1.0,"s:a":[null,true]}"#
        );
    }

    #[test]
    fn test_is_container() {
        assert!(JsonNode::Array(vec![]).is_container());
        assert!(JsonNode::Object(vec![]).is_container());
        assert!(!JsonNode::String("s:x".to_string()).is_container());
        assert!(!JsonNode::Number(1.0).is_container());
    }
}
