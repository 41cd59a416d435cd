//! The TJSON tag grammar.
//!
//! Every JSON string in a TJSON document starts with a short tag followed by
//! `:`. The tag selects how the rest of the string (the body) is interpreted:
//!
//! | Tag   | Value            |
//! |-------|------------------|
//! | `s`   | UTF-8 text       |
//! | `b16` | binary, base-16  |
//! | `b32` | binary, base-32  |
//! | `b64` | binary, base-64url |
//! | `i`   | signed integer   |
//! | `u`   | unsigned integer |
//! | `t`   | UTC timestamp    |

use crate::binary::BinaryEncoding;
use crate::error::MISSING_TAG_DELIMITER;
use crate::{Error, Result};

/// The delimiter must appear within this many characters of the start.
const TAG_WINDOW: usize = 4;

/// A recognized TJSON tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    String,
    Binary(BinaryEncoding),
    SignedInt,
    UnsignedInt,
    Timestamp,
}

impl Tag {
    /// Looks up a tag by its name (without the trailing `:`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Tag> {
        match name {
            "s" => Some(Tag::String),
            "b16" => Some(Tag::Binary(BinaryEncoding::Base16)),
            "b32" => Some(Tag::Binary(BinaryEncoding::Base32)),
            "b64" => Some(Tag::Binary(BinaryEncoding::Base64)),
            "i" => Some(Tag::SignedInt),
            "u" => Some(Tag::UnsignedInt),
            "t" => Some(Tag::Timestamp),
            _ => None,
        }
    }

    /// The string prefix written for this tag, delimiter included.
    ///
    /// ```rust
    /// use serde_tjson::tag::Tag;
    ///
    /// assert_eq!(Tag::String.prefix(), "s:");
    /// assert_eq!(Tag::from_name("b32").map(|t| t.prefix()), Some("b32:"));
    /// ```
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Tag::String => "s:",
            Tag::Binary(BinaryEncoding::Base16) => "b16:",
            Tag::Binary(BinaryEncoding::Base32) => "b32:",
            Tag::Binary(BinaryEncoding::Base64) => "b64:",
            Tag::SignedInt => "i:",
            Tag::UnsignedInt => "u:",
            Tag::Timestamp => "t:",
        }
    }
}

/// Splits a tagged string into its tag and body.
///
/// # Errors
///
/// Fails when no `:` occurs among the first four characters, or when the
/// text before it is not a known tag.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::tag::{split, Tag};
///
/// assert_eq!(split("s:hello").unwrap(), (Tag::String, "hello"));
/// assert!(split("hello").is_err());
/// ```
pub fn split(s: &str) -> Result<(Tag, &str)> {
    let delimiter = s
        .char_indices()
        .take(TAG_WINDOW)
        .find(|&(_, ch)| ch == ':')
        .map(|(index, _)| index)
        .ok_or_else(|| Error::parse(MISSING_TAG_DELIMITER))?;

    let (name, body) = (&s[..delimiter], &s[delimiter + 1..]);
    match Tag::from_name(name) {
        Some(tag) => Ok((tag, body)),
        None => Err(Error::parse(format!(
            "Invalid tag '{}:' on string '{}'",
            name, s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_known_tags() {
        assert_eq!(split("s:").unwrap(), (Tag::String, ""));
        assert_eq!(split("i:-4").unwrap(), (Tag::SignedInt, "-4"));
        assert_eq!(split("u:4").unwrap(), (Tag::UnsignedInt, "4"));
        assert_eq!(
            split("t:2016-10-02T07:31:51Z").unwrap(),
            (Tag::Timestamp, "2016-10-02T07:31:51Z")
        );
        assert_eq!(
            split("b64:Zm9v").unwrap(),
            (Tag::Binary(BinaryEncoding::Base64), "Zm9v")
        );
    }

    #[test]
    fn test_body_may_contain_colons() {
        assert_eq!(split("s:a:b:c").unwrap(), (Tag::String, "a:b:c"));
    }

    #[test]
    fn test_missing_delimiter() {
        for input in ["", "foo", "hello, world!", "b640:"] {
            let err = split(input).unwrap_err();
            assert_eq!(err.to_string(), "Invalid tag (missing ':' delimeter)");
        }
    }

    #[test]
    fn test_window_counts_characters() {
        // Multi-byte characters count once each.
        let err = split("ééé:x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tag 'ééé:' on string 'ééé:x'");
    }

    #[test]
    fn test_unknown_tag() {
        let err = split("x:foo").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.to_string(), "Invalid tag 'x:' on string 'x:foo'");

        let err = split(":foo").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tag ':' on string ':foo'");
    }

    #[test]
    fn test_prefix_matches_name() {
        for name in ["s", "b16", "b32", "b64", "i", "u", "t"] {
            let tag = Tag::from_name(name).unwrap();
            assert_eq!(tag.prefix(), format!("{}:", name));
        }
    }
}
