//! Bucket nodes: one calendar span at one resolution.

use crate::types::{Interval, TallyError, TallyResult, Timestamp};

use super::level::Level;

/// What a node owns below it.
pub(super) enum Slots<V> {
    /// Fixed array of optional children, one slot per calendar value of
    /// the next finer level.
    Branch {
        level: Level,
        children: Box<[Option<BucketNode<V>>]>,
    },
    /// Minute leaf: values in insertion order, duplicates kept.
    Leaf(Vec<V>),
}

/// A node covering `[start, end)` at one calendar level.
///
/// Children are created on first insert into their span and never removed.
/// Every value stored below a node has a timestamp inside the node's span.
pub struct BucketNode<V> {
    level: Level,
    key_part: i32,
    start: Timestamp,
    end: Timestamp,
    pub(super) slots: Slots<V>,
}

impl<V> BucketNode<V> {
    /// Create an empty node of `level` whose span begins at `start`.
    ///
    /// `start` is expected to be the first minute of a `level` bucket.
    pub fn new(level: Level, start: Timestamp) -> Self {
        let slots = match level.child() {
            Some(child) => Slots::Branch {
                level: child,
                children: (0..child.capacity()).map(|_| None).collect(),
            },
            None => Slots::Leaf(Vec::new()),
        };
        log::trace!("Creating {} bucket at {}", level.name(), start);
        Self {
            level,
            key_part: level.key_part(start),
            start,
            end: level.span_end(start),
            slots,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Calendar component this node represents (e.g. 7 for July).
    pub fn key_part(&self) -> i32 {
        self.key_part
    }

    /// Inclusive start of the node's span.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Exclusive end of the node's span.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether the node's span shares at least one minute with `interval`.
    pub fn overlaps(&self, interval: &Interval) -> bool {
        interval.overlaps(self.start, self.end)
    }

    /// Store `value` under the minute of `timestamp`, creating the missing
    /// buckets on the way down.
    pub fn insert(&mut self, timestamp: Timestamp, value: V) -> TallyResult<()> {
        let node_start = self.start;
        match &mut self.slots {
            Slots::Leaf(values) => {
                let actual = timestamp.minute();
                if actual as i32 != self.key_part {
                    return Err(TallyError::InvariantViolation {
                        expected: self.key_part as u32,
                        actual,
                    });
                }
                values.push(value);
                Ok(())
            }
            Slots::Branch { level, children } => {
                let level = *level;
                let part = level.key_part(timestamp);
                let entry = &mut children[level.slot(part)];
                let child = match entry {
                    Some(child) => child,
                    None => {
                        let start = level.child_start(node_start, part)?;
                        entry.insert(BucketNode::new(level, start))
                    }
                };
                child.insert(timestamp, value)
            }
        }
    }

    /// Values stored at exactly the minute of `timestamp`, or an empty slice.
    pub fn lookup(&self, timestamp: Timestamp) -> &[V] {
        match &self.slots {
            Slots::Leaf(values) => {
                if timestamp.minute() as i32 == self.key_part {
                    values
                } else {
                    &[]
                }
            }
            Slots::Branch { level, children } => {
                let slot = level.slot(level.key_part(timestamp));
                match children.get(slot) {
                    Some(Some(child)) => child.lookup(timestamp),
                    _ => &[],
                }
            }
        }
    }

    /// Present children in ascending calendar order (empty for a leaf).
    pub fn children(&self) -> impl Iterator<Item = &BucketNode<V>> {
        let children: &[Option<BucketNode<V>>] = match &self.slots {
            Slots::Branch { children, .. } => children,
            Slots::Leaf(_) => &[],
        };
        children.iter().flatten()
    }

    /// Values held by a minute leaf (empty for inner nodes).
    pub fn values(&self) -> &[V] {
        match &self.slots {
            Slots::Leaf(values) => values,
            Slots::Branch { .. } => &[],
        }
    }

    /// Total number of values stored under this node.
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Leaf(values) => values.len(),
            Slots::Branch { .. } => self.children().map(BucketNode::len).sum(),
        }
    }

    /// Whether nothing is stored under this node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the earliest minute holding a value.
    pub fn first_minute(&self) -> Option<Timestamp> {
        match &self.slots {
            Slots::Leaf(values) if !values.is_empty() => Some(self.start),
            Slots::Leaf(_) => None,
            Slots::Branch { .. } => self.children().find_map(BucketNode::first_minute),
        }
    }

    /// Start of the latest minute holding a value.
    pub fn last_minute(&self) -> Option<Timestamp> {
        match &self.slots {
            Slots::Leaf(values) if !values.is_empty() => Some(self.start),
            Slots::Leaf(_) => None,
            Slots::Branch { children, .. } => children
                .iter()
                .rev()
                .flatten()
                .find_map(BucketNode::last_minute),
        }
    }
}
