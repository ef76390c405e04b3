//! Nanosecond-precision timestamps and raw-buffer timestamp scanning.

use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, PrimitiveDateTime};

use crate::err::{Error, Result};

const BASE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Length of the `YYYY-MM-DD HH:MM:SS` prefix every timestamp carries.
pub const BASE_LEN: usize = 19;
/// Longest token recognized: the base prefix, a separator, and nine
/// fractional digits.
const MAX_LEN: usize = BASE_LEN + 1 + 9;

/// A wall-clock instant with nanosecond precision.
///
/// Ordering compares the whole seconds first and the fractional part second,
/// so timestamps sort the same way the rendered lines do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    /// Parses `YYYY-MM-DD HH:MM:SS` with an optional fractional part of one
    /// to nine digits after a `.` or `,`. Shorter fractions scale up (`.1` is
    /// 100ms) and digits past the ninth are ignored.
    pub fn parse(s: &str) -> Result<Self> {
        let err = || Error::InvalidTimestamp(s.to_string());

        if s.len() < BASE_LEN || !s.is_char_boundary(BASE_LEN) {
            return Err(err());
        }
        let dt = PrimitiveDateTime::parse(&s[..BASE_LEN], BASE_FORMAT).map_err(|_| err())?;

        let rest = &s[BASE_LEN..];
        if rest.is_empty() {
            return Ok(Self(dt));
        }
        let frac = rest.strip_prefix(['.', ',']).ok_or_else(err)?;
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let mut nanos: u32 = 0;
        for b in frac.bytes().take(9) {
            nanos = nanos * 10 + u32::from(b - b'0');
        }
        for _ in frac.len().min(9)..9 {
            nanos *= 10;
        }

        let dt = dt.replace_nanosecond(nanos).map_err(|_| err())?;
        Ok(Self(dt))
    }

    pub(crate) fn checked_add(self, d: Duration) -> Option<Self> {
        self.0.checked_add(d).map(Self)
    }

    pub(crate) fn checked_sub(self, d: Duration) -> Option<Self> {
        self.0.checked_sub(d).map(Self)
    }
}

impl fmt::Display for Timestamp {
    /// Renders the base format, then the fractional seconds with trailing
    /// zeros trimmed. A zero fraction is omitted entirely.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.0.format(BASE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&base)?;

        let mut nanos = self.0.nanosecond();
        if nanos > 0 {
            let mut width = 9;
            while width > 1 && nanos % 10 == 0 {
                nanos /= 10;
                width -= 1;
            }
            write!(f, ".{nanos:0width$}")?;
        }
        Ok(())
    }
}

fn is_timestamp_at(buf: &[u8], at: usize) -> bool {
    let Some(w) = buf.get(at..at + BASE_LEN) else {
        return false;
    };
    if w[4] != b'-' || w[7] != b'-' || w[10] != b' ' || w[13] != b':' || w[16] != b':' {
        return false;
    }
    w.iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7 | 10 | 13 | 16) || b.is_ascii_digit())
}

/// Byte offset of the first timestamp-shaped token in `buf`, if any.
///
/// Candidates are located by the `-` separating year from month, so the scan
/// skips over runs of ordinary text without inspecting every position.
pub fn find_in(buf: &[u8]) -> Option<usize> {
    memchr::memchr_iter(b'-', buf)
        .filter_map(|sep| sep.checked_sub(4))
        .find(|&at| is_timestamp_at(buf, at))
}

/// Parses the timestamp at a known offset, consuming the optional fractional
/// tail. Returns the value and the token length in bytes.
///
/// Tokens shaped like a timestamp but with out-of-range components (month 13
/// and the like) yield `None`.
pub fn extract_at(buf: &[u8], at: usize) -> Option<(Timestamp, usize)> {
    if !is_timestamp_at(buf, at) {
        return None;
    }

    let mut len = BASE_LEN;
    let has_fraction = matches!(buf.get(at + BASE_LEN).copied(), Some(b'.' | b','))
        && buf
            .get(at + BASE_LEN + 1)
            .is_some_and(|b| b.is_ascii_digit());
    if has_fraction {
        len += 2;
        while len < MAX_LEN && buf.get(at + len).is_some_and(|b| b.is_ascii_digit()) {
            len += 1;
        }
    }

    let token = std::str::from_utf8(&buf[at..at + len]).ok()?;
    Timestamp::parse(token).ok().map(|ts| (ts, len))
}
