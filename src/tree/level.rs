//! Calendar levels of the bucket tree and their span arithmetic.

use chrono::{Days, Months};

use crate::types::{TallyResult, Timestamp};

/// One resolution of the calendar trie.
///
/// Each level knows how many sibling buckets can exist under one parent,
/// how a calendar component maps to a slot, and how long a bucket lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl Level {
    /// All levels, coarsest first.
    pub const ALL: [Level; 5] = [
        Level::Year,
        Level::Month,
        Level::Day,
        Level::Hour,
        Level::Minute,
    ];

    /// Return a human-readable name for this level.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }

    /// The next finer level, `None` for the minute leaf.
    pub fn child(self) -> Option<Level> {
        match self {
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Day),
            Self::Day => Some(Self::Hour),
            Self::Hour => Some(Self::Minute),
            Self::Minute => None,
        }
    }

    /// Number of buckets of this level that fit under one parent.
    ///
    /// Days always get 31 slots regardless of the month's real length.
    /// Years sit under the unbounded root and report 0.
    pub fn capacity(self) -> usize {
        match self {
            Self::Year => 0,
            Self::Month => 12,
            Self::Day => 31,
            Self::Hour => 24,
            Self::Minute => 60,
        }
    }

    /// Calendar value stored in slot 0 (months and days count from 1).
    pub fn index_base(self) -> i32 {
        match self {
            Self::Month | Self::Day => 1,
            Self::Year | Self::Hour | Self::Minute => 0,
        }
    }

    /// The calendar component of `at` for this level.
    pub fn key_part(self, at: Timestamp) -> i32 {
        match self {
            Self::Year => at.year(),
            Self::Month => at.month() as i32,
            Self::Day => at.day() as i32,
            Self::Hour => at.hour() as i32,
            Self::Minute => at.minute() as i32,
        }
    }

    /// Zero-based child slot for a key part of this level.
    pub fn slot(self, key_part: i32) -> usize {
        debug_assert!(key_part >= self.index_base());
        (key_part - self.index_base()) as usize
    }

    /// Start of the bucket of this level holding `key_part`, placed inside
    /// the parent bucket starting at `parent_start`.
    ///
    /// Years ignore `parent_start`: the root spans all of time.
    pub fn child_start(self, parent_start: Timestamp, key_part: i32) -> TallyResult<Timestamp> {
        let p = parent_start;
        let part = key_part as u32;
        match self {
            Self::Year => Timestamp::new(key_part, 1, 1, 0, 0),
            Self::Month => Timestamp::new(p.year(), part, 1, 0, 0),
            Self::Day => Timestamp::new(p.year(), p.month(), part, 0, 0),
            Self::Hour => Timestamp::new(p.year(), p.month(), p.day(), part, 0),
            Self::Minute => Timestamp::new(p.year(), p.month(), p.day(), p.hour(), part),
        }
    }

    /// Exclusive end of the bucket of this level starting at `start`.
    ///
    /// Saturates at [`Timestamp::MAX`] past the end of the calendar.
    pub fn span_end(self, start: Timestamp) -> Timestamp {
        let naive = start.as_naive();
        let end = match self {
            Self::Year => naive.checked_add_months(Months::new(12)).map(Timestamp::from),
            Self::Month => naive.checked_add_months(Months::new(1)).map(Timestamp::from),
            Self::Day => naive.checked_add_days(Days::new(1)).map(Timestamp::from),
            Self::Hour => start.checked_add_minutes(60),
            Self::Minute => start.checked_add_minutes(1),
        };
        end.unwrap_or(Timestamp::MAX)
    }
}
