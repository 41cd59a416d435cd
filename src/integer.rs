//! Bounded integer parsing for the `i:` and `u:` tags.
//!
//! Literals are parsed exactly into a [`BigInt`] before the 64-bit range check,
//! so an out-of-range literal of any length is reported with its full value
//! instead of wrapping.

use num_bigint::{BigInt, Sign};

use crate::{Error, Result};

/// Parses the body of an `i:` tag.
///
/// # Examples
///
/// ```rust
/// use serde_tjson::integer::parse_signed;
///
/// assert_eq!(parse_signed("-42").unwrap(), -42);
/// assert_eq!(
///     parse_signed("9223372036854775808").unwrap_err().to_string(),
///     "oversized integer: 9223372036854775808"
/// );
/// ```
///
/// # Errors
///
/// Fails on a malformed literal or a value outside the `i64` range.
pub fn parse_signed(body: &str) -> Result<i64> {
    let value = parse_literal(body)?;
    i64::try_from(&value).map_err(|_| match value.sign() {
        Sign::Minus => Error::parse(format!("undersized integer: {}", value)),
        _ => Error::parse(format!("oversized integer: {}", value)),
    })
}

/// Parses the body of a `u:` tag.
///
/// # Errors
///
/// Fails on a malformed literal, a negative value, or a value above `u64::MAX`.
pub fn parse_unsigned(body: &str) -> Result<u64> {
    let value = parse_literal(body)?;
    if value.sign() == Sign::Minus {
        return Err(Error::parse(format!(
            "negative value for unsigned integer: {}",
            value
        )));
    }
    u64::try_from(&value).map_err(|_| Error::parse(format!("oversized integer: {}", value)))
}

/// Accepts an optional `-` followed by one or more ASCII digits.
fn parse_literal(body: &str) -> Result<BigInt> {
    let digits = body.strip_prefix('-').unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_literal(body));
    }
    body.parse::<BigInt>().map_err(|_| invalid_literal(body))
}

fn invalid_literal(body: &str) -> Error {
    Error::parse(format!("invalid integer literal: '{}'", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_range() {
        assert_eq!(parse_signed("42").unwrap(), 42);
        assert_eq!(parse_signed("-9223372036854775808").unwrap(), i64::MIN);
        assert_eq!(parse_signed("9223372036854775807").unwrap(), i64::MAX);
    }

    #[test]
    fn test_signed_out_of_range() {
        assert_eq!(
            parse_signed("9223372036854775808").unwrap_err().to_string(),
            "oversized integer: 9223372036854775808"
        );
        assert_eq!(
            parse_signed("-9223372036854775809").unwrap_err().to_string(),
            "undersized integer: -9223372036854775809"
        );
    }

    #[test]
    fn test_long_literal_is_not_truncated() {
        let literal = "1234567890123456789012345678901234567890";
        assert_eq!(
            parse_signed(literal).unwrap_err().to_string(),
            format!("oversized integer: {}", literal)
        );
        assert_eq!(
            parse_unsigned(literal).unwrap_err().to_string(),
            format!("oversized integer: {}", literal)
        );
    }

    #[test]
    fn test_unsigned_range() {
        assert_eq!(parse_unsigned("42").unwrap(), 42);
        assert_eq!(parse_unsigned("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(parse_unsigned("-0").unwrap(), 0);
        assert_eq!(
            parse_unsigned("18446744073709551616").unwrap_err().to_string(),
            "oversized integer: 18446744073709551616"
        );
        assert_eq!(
            parse_unsigned("-1").unwrap_err().to_string(),
            "negative value for unsigned integer: -1"
        );
    }

    #[test]
    fn test_leading_zeros_are_normalized() {
        assert_eq!(parse_signed("007").unwrap(), 7);
        assert_eq!(
            parse_signed("09223372036854775808").unwrap_err().to_string(),
            "oversized integer: 9223372036854775808"
        );
    }

    #[test]
    fn test_invalid_literals() {
        for body in ["", "-", "+1", " 1", "1_000", "1.5", "This is not a valid integer"] {
            let err = parse_signed(body).unwrap_err();
            assert!(err.is_parse());
            assert_eq!(err.to_string(), format!("invalid integer literal: '{}'", body));
            assert!(parse_unsigned(body).is_err());
        }
    }
}
