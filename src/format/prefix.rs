//! Date-prefix parsing for queries and dataset timestamps.
//!
//! Recognized shapes, each field zero-padded to a fixed width:
//!
//! - prefixes: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DD hh`, `YYYY-MM-DD hh:mm`
//! - timestamps: `YYYY-MM-DD hh:mm` and `YYYY-MM-DD hh:mm:ss`
//!
//! Anything else is [`TallyError::InvalidFormat`]; a well-shaped string
//! naming an impossible date or time is [`TallyError::InvalidDate`].

use crate::tree::Level;
use crate::types::{Interval, TallyError, TallyResult, Timestamp};

/// Byte offset just past each field of `YYYY-MM-DD hh:mm:ss`.
const FIELD_ENDS: [usize; 6] = [4, 7, 10, 13, 16, 19];

/// Separator following each field but the last.
const SEPARATORS: [u8; 5] = [b'-', b'-', b' ', b':', b':'];

/// Split a (possibly truncated) `YYYY-MM-DD hh:mm:ss` string into numbers.
fn split_fields(input: &str) -> Option<Vec<u32>> {
    let bytes = input.as_bytes();
    let count = FIELD_ENDS.iter().position(|&end| end == bytes.len())? + 1;

    let mut fields = Vec::with_capacity(count);
    let mut start = 0;
    for (i, &end) in FIELD_ENDS[..count].iter().enumerate() {
        let digits = &bytes[start..end];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        fields.push(
            digits
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')),
        );
        if i + 1 < count && bytes[end] != SEPARATORS[i] {
            return None;
        }
        start = end + 1;
    }
    Some(fields)
}

/// Turn a date prefix into the half-open interval covering exactly that
/// calendar unit.
///
/// `"2015"` covers the whole year, `"2015-12"` runs to `2016-01-01 00:00`,
/// `"2015-03-15 11:07"` is a single minute.
pub fn parse_date_prefix(input: &str) -> TallyResult<Interval> {
    let fields = split_fields(input)
        .filter(|fields| fields.len() <= Level::ALL.len())
        .ok_or_else(|| TallyError::InvalidFormat(input.to_string()))?;

    let level = Level::ALL[fields.len() - 1];
    let field = |i: usize, default: u32| fields.get(i).copied().unwrap_or(default);
    let start = Timestamp::new(
        fields[0] as i32,
        field(1, 1),
        field(2, 1),
        field(3, 0),
        field(4, 0),
    )
    .map_err(|_| TallyError::InvalidDate(input.to_string()))?;

    Ok(Interval::new(start, level.span_end(start)))
}

/// Parse a full `YYYY-MM-DD hh:mm[:ss]` timestamp. Seconds are checked and
/// then dropped.
pub fn parse_timestamp(input: &str) -> TallyResult<Timestamp> {
    let fields = split_fields(input)
        .filter(|fields| fields.len() >= 5)
        .ok_or_else(|| TallyError::InvalidFormat(input.to_string()))?;

    if fields.get(5).is_some_and(|&seconds| seconds > 59) {
        return Err(TallyError::InvalidDate(input.to_string()));
    }
    Timestamp::new(fields[0] as i32, fields[1], fields[2], fields[3], fields[4])
        .map_err(|_| TallyError::InvalidDate(input.to_string()))
}
