//! A single timestamped value from a query log.

use super::Timestamp;

/// One `(timestamp, value)` pair, the unit of bulk loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Minute the value was observed at.
    pub timestamp: Timestamp,
    /// The logged text, e.g. a search query.
    pub value: String,
}

impl Record {
    pub fn new(timestamp: Timestamp, value: impl Into<String>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}
