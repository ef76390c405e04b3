//! Parsing of the target time range argument.

use std::str::FromStr;

use time::Duration;

use crate::err::Error;
use crate::timestamp::{self, Timestamp};

/// An inclusive window of time to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl SearchRange {
    /// A degenerate range matching a single instant.
    pub fn instant(t: Timestamp) -> Self {
        Self { start: t, end: t }
    }
}

impl FromStr for SearchRange {
    type Err = Error;

    /// Parses `<timestamp>[+|-|~]<number><unit>`.
    ///
    /// `+` extends the window forward from the timestamp, `-` backward, and
    /// `~` both ways. Units are `s`, `m`, `h` and `d`. A bare timestamp is a
    /// single-instant range. Fractional seconds in the timestamp carry over
    /// into both bounds.
    fn from_str(s: &str) -> Result<Self, Error> {
        let err = || Error::InvalidRange(s.to_string());

        let (t, len) = timestamp::extract_at(s.as_bytes(), 0).ok_or_else(err)?;
        let rest = &s[len..];
        if rest.is_empty() {
            return Ok(Self::instant(t));
        }

        let mut chars = rest.chars();
        let op = chars.next().ok_or_else(err)?;
        let body = chars.as_str();

        let unit_at = body.find(|c: char| !c.is_ascii_digit()).ok_or_else(err)?;
        let (digits, unit) = body.split_at(unit_at);
        if digits.is_empty() {
            return Err(err());
        }
        let n: i64 = digits.parse().map_err(|_| err())?;
        let unit_secs = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            "d" => 86400,
            _ => return Err(err()),
        };
        let dur = Duration::seconds(n.checked_mul(unit_secs).ok_or_else(err)?);

        let (start, end) = match op {
            '+' => (Some(t), t.checked_add(dur)),
            '-' => (t.checked_sub(dur), Some(t)),
            '~' => (t.checked_sub(dur), t.checked_add(dur)),
            _ => return Err(err()),
        };
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(err()),
        }
    }
}
