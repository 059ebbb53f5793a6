//! The root of the calendar trie.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::types::{Interval, TallyResult, Timestamp};

use super::level::Level;
use super::node::BucketNode;
use super::scan::Scan;

/// Calendar-bucketed index: year → month → day → hour → minute.
///
/// The year domain is unbounded, so the root keeps a sparse ordered map of
/// year nodes instead of a fixed slot array. Below it every level is a
/// fixed-capacity [`BucketNode`].
pub struct IndexTree<V> {
    years: BTreeMap<i32, BucketNode<V>>,
    len: usize,
}

impl<V> IndexTree<V> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            years: BTreeMap::new(),
            len: 0,
        }
    }

    /// Store `value` at the minute of `timestamp`.
    pub fn insert(&mut self, timestamp: Timestamp, value: V) -> TallyResult<()> {
        let year = timestamp.year();
        let node = match self.years.entry(year) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let start = Timestamp::new(year, 1, 1, 0, 0)?;
                entry.insert(BucketNode::new(Level::Year, start))
            }
        };
        node.insert(timestamp, value)?;
        self.len += 1;
        Ok(())
    }

    /// Values stored at exactly the minute of `timestamp`, in insertion order.
    pub fn lookup(&self, timestamp: Timestamp) -> &[V] {
        match self.years.get(&timestamp.year()) {
            Some(node) => node.lookup(timestamp),
            None => &[],
        }
    }

    /// Lazily yield every value stored in `interval`, chronologically.
    ///
    /// Only years from `interval.start` to `interval.end` (inclusive) are
    /// considered; missing years cost nothing.
    pub fn scan(&self, interval: &Interval) -> Scan<'_, V> {
        let first = interval.start.year();
        let last = interval.end.year();
        let years = if first <= last {
            self.years.range(first..=last)
        } else {
            self.years.range(first..first)
        };
        Scan::new(*interval, years)
    }

    /// Total number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct years holding data.
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Year nodes in ascending order.
    pub fn years(&self) -> impl Iterator<Item = &BucketNode<V>> {
        self.years.values()
    }

    /// Start of the earliest minute holding a value.
    pub fn first_minute(&self) -> Option<Timestamp> {
        self.years.values().find_map(BucketNode::first_minute)
    }

    /// Start of the latest minute holding a value.
    pub fn last_minute(&self) -> Option<Timestamp> {
        self.years.values().rev().find_map(BucketNode::last_minute)
    }
}

impl<V> Default for IndexTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
