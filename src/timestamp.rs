//! UTC timestamps for the `t:` tag.
//!
//! The only accepted form is `YYYY-MM-DDThh:mm:ssZ`: UTC, whole seconds,
//! zero-padded fields and a literal `Z`.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};

use crate::{Error, Result};

pub(crate) const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Byte layout of a timestamp body; `d` marks an ASCII digit.
const SHAPE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";

/// Parses the body of a `t:` tag.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use serde_tjson::timestamp;
///
/// let parsed = timestamp::parse("2016-10-02T07:31:51Z").unwrap();
/// assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 10, 2, 7, 31, 51).unwrap());
/// assert!(timestamp::parse("2016-10-02T07:31:51-08:00").is_err());
/// ```
///
/// # Errors
///
/// Fails with a format-mismatch parse error naming the body.
pub fn parse(body: &str) -> Result<DateTime<Utc>> {
    if !has_shape(body) {
        return Err(mismatch(body));
    }
    let naive = NaiveDateTime::parse_from_str(body, FORMAT).map_err(|_| mismatch(body))?;
    // chrono reads `:60` as a leap second
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(mismatch(body));
    }
    if naive.year() < 1 {
        return Err(mismatch(body));
    }
    Ok(naive.and_utc())
}

/// Formats a timestamp as a `t:` body, dropping any fractional second.
///
/// # Errors
///
/// Fails with an encode error when the year does not fit in four digits.
pub fn format(timestamp: &DateTime<Utc>) -> Result<String> {
    let year = timestamp.year();
    if !(1..=9999).contains(&year) {
        return Err(Error::encode(format!(
            "Timestamp year {} is outside the range 0001-9999",
            year
        )));
    }
    Ok(timestamp.format(FORMAT).to_string())
}

fn has_shape(body: &str) -> bool {
    let bytes = body.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE.iter()).all(|(&b, &expected)| match expected {
            b'd' => b.is_ascii_digit(),
            _ => b == expected,
        })
}

fn mismatch(body: &str) -> Error {
    Error::parse(format!(
        "time data '{}' does not match format '{}'",
        body, FORMAT
    ))
}
