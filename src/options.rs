//! Configuration options for TJSON decoding and encoding.
//!
//! TJSON gives no tag to JSON `null`, `true` and `false`. By default they pass
//! through both directions unchanged, so a document like `[null, true]` decodes
//! to `[Null, Bool(true)]`. Strict mode rejects them instead.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tjson::{decode_with_options, TjsonOptions};
//!
//! assert!(decode_with_options("[true]", TjsonOptions::new()).is_ok());
//!
//! let err = decode_with_options("[true]", TjsonOptions::strict()).unwrap_err();
//! assert_eq!(err.to_string(), "Untagged null and boolean values are disallowed");
//! ```

/// Configuration options shared by the decoder and the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::TjsonOptions;
///
/// let options = TjsonOptions::new();
/// assert!(!options.strict);
///
/// let options = TjsonOptions::new().with_strict(true);
/// assert!(options.strict);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TjsonOptions {
    /// Reject untagged `null` and boolean values.
    pub strict: bool,
}

impl TjsonOptions {
    /// Creates default options (permissive null and boolean handling).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with strict mode enabled.
    #[must_use]
    pub fn strict() -> Self {
        TjsonOptions { strict: true }
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
