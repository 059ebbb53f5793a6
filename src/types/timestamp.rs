//! Minute-granularity timestamps and half-open intervals.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::types::error::{TallyError, TallyResult};

/// A point in time truncated to the minute.
///
/// Ordering is chronological. All calendar accessors return the component
/// of the (naive, zone-less) civil time the timestamp was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Latest representable timestamp, used to saturate span arithmetic.
    pub const MAX: Timestamp = Timestamp(NaiveDateTime::MAX);

    /// Build a timestamp from calendar components.
    ///
    /// Fails with [`TallyError::InvalidDate`] when the components do not name
    /// a real minute (e.g. April 31st, hour 24).
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> TallyResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
            .ok_or_else(|| {
                TallyError::InvalidDate(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}",
                    year, month, day, hour, minute
                ))
            })
    }

    /// Wrap a chrono datetime, dropping seconds and anything finer.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        let truncated = datetime
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(datetime);
        Self(truncated)
    }

    /// The underlying chrono datetime.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-based.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1-based.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Shift by a signed number of minutes, `None` on calendar overflow.
    pub fn checked_add_minutes(self, minutes: i64) -> Option<Self> {
        TimeDelta::try_minutes(minutes)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_naive(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

/// Half-open time interval `[start, end)`.
///
/// `start <= end` is expected but not enforced; an inverted interval simply
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Inclusive lower bound.
    pub start: Timestamp,
    /// Exclusive upper bound.
    pub end: Timestamp,
}

impl Interval {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// The one-minute interval starting at `at`.
    pub fn minute(at: Timestamp) -> Self {
        let end = at.checked_add_minutes(1).unwrap_or(Timestamp::MAX);
        Self { start: at, end }
    }

    /// Whether `at` falls inside the interval.
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }

    /// Whether the half-open span `[start, end)` shares at least one minute
    /// with this interval.
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        start < self.end && self.start < end
    }

    /// True when no timestamp can satisfy `start <= t < end`.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
