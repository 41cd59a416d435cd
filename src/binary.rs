//! Binary data sub-codec.
//!
//! TJSON carries byte strings in three encodings, each with a strict canonical
//! form on input:
//!
//! - `b16:` lowercase hexadecimal
//! - `b32:` lowercase RFC 4648 base-32 without padding
//! - `b64:` RFC 4648 base-64url without padding
//!
//! All three accept an empty body. The encoder only ever writes `b64:`.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::{Error, Result};

/// URL-safe decoding that ignores non-zero bits after the last full byte.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE32_ALPHABET_LOWER: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// One of the three TJSON binary encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryEncoding {
    Base16,
    Base32,
    Base64,
}

impl BinaryEncoding {
    /// Decodes a tag body into bytes, rejecting any non-canonical form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tjson::binary::BinaryEncoding;
    ///
    /// assert_eq!(BinaryEncoding::Base16.decode("666f6f").unwrap(), b"foo");
    /// assert_eq!(BinaryEncoding::Base32.decode("mzxw6").unwrap(), b"foo");
    /// assert_eq!(BinaryEncoding::Base64.decode("Zm9v").unwrap(), b"foo");
    /// assert!(BinaryEncoding::Base16.decode("666F6F").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a parse error describing the first violation found.
    pub fn decode(&self, body: &str) -> Result<Vec<u8>> {
        match self {
            BinaryEncoding::Base16 => decode_base16(body),
            BinaryEncoding::Base32 => decode_base32(body),
            BinaryEncoding::Base64 => decode_base64(body),
        }
    }

    /// Encodes bytes into the canonical body for this encoding.
    #[must_use]
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            BinaryEncoding::Base16 => hex::encode(bytes),
            BinaryEncoding::Base32 => encode_base32(bytes),
            BinaryEncoding::Base64 => URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

fn decode_base16(body: &str) -> Result<Vec<u8>> {
    if body.bytes().any(|b| (b'A'..=b'F').contains(&b)) {
        return Err(Error::parse("Base16 data must be lowercase"));
    }
    hex::decode(body).map_err(|_| Error::parse("Invalid hexadecimal data"))
}

fn decode_base32(body: &str) -> Result<Vec<u8>> {
    if body.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(Error::parse("Base32 data must be lowercase"));
    }
    if body.ends_with('=') {
        return Err(Error::parse("Base32 data must not include padding"));
    }

    let mut padded = body.to_ascii_uppercase();
    let padding = (8 - padded.len() % 8) % 8;
    padded.extend(std::iter::repeat('=').take(padding));

    decode_padded_base32(&padded).ok_or_else(|| Error::parse("Invalid base32-encoded data"))
}

/// Standard RFC 4648 base-32 decoding of fully padded, uppercase input.
fn decode_padded_base32(input: &str) -> Option<Vec<u8>> {
    let data = input.trim_end_matches('=');
    let padding = input.len() - data.len();
    if input.len() % 8 != 0 || !matches!(padding, 0 | 1 | 3 | 4 | 6) {
        return None;
    }

    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for symbol in data.bytes() {
        let value = BASE32_ALPHABET.iter().position(|&c| c == symbol)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    Some(out)
}

fn encode_base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET_LOWER[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET_LOWER[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn decode_base64(body: &str) -> Result<Vec<u8>> {
    if body.contains(['+', '/']) {
        return Err(Error::parse("Base64 data must not contain '+' or '/'"));
    }
    if body.ends_with('=') {
        return Err(Error::parse("Base64 data must not include padding"));
    }

    let mut padded = body.to_string();
    let padding = (4 - padded.len() % 4) % 4;
    padded.extend(std::iter::repeat('=').take(padding));

    URL_SAFE_LENIENT
        .decode(padded.as_bytes())
        .map_err(|_| Error::parse("Invalid base64-encoded data"))
}
