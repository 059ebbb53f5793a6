//! Lazy interval scan over the bucket tree.

use std::collections::btree_map;
use std::iter::{Flatten, FusedIterator};
use std::slice;

use crate::types::Interval;

use super::node::{BucketNode, Slots};

type Children<'a, V> = Flatten<slice::Iter<'a, Option<BucketNode<V>>>>;

/// Forward-only iterator over every value whose minute falls in an interval.
///
/// Values come out in chronological order (year, month, day, hour, minute)
/// and in insertion order within a minute. A node whose span misses the
/// interval is skipped together with its whole subtree. Nothing is
/// materialized: the iterator keeps one child cursor per open level.
pub struct Scan<'a, V> {
    interval: Interval,
    years: btree_map::Range<'a, i32, BucketNode<V>>,
    stack: Vec<Children<'a, V>>,
    values: slice::Iter<'a, V>,
}

impl<'a, V> Scan<'a, V> {
    pub(super) fn new(interval: Interval, years: btree_map::Range<'a, i32, BucketNode<V>>) -> Self {
        let empty: &[V] = &[];
        Self {
            interval,
            years,
            stack: Vec::with_capacity(4),
            values: empty.iter(),
        }
    }

    fn enter(&mut self, node: &'a BucketNode<V>) {
        if !node.overlaps(&self.interval) {
            return;
        }
        match &node.slots {
            Slots::Branch { children, .. } => self.stack.push(children.iter().flatten()),
            Slots::Leaf(values) => self.values = values.iter(),
        }
    }
}

impl<'a, V> Iterator for Scan<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        loop {
            if let Some(value) = self.values.next() {
                return Some(value);
            }
            let next_node = match self.stack.last_mut() {
                Some(children) => children.next(),
                None => self.years.next().map(|(_, year)| year),
            };
            match next_node {
                Some(node) => self.enter(node),
                None if self.stack.pop().is_some() => {}
                None => return None,
            }
        }
    }
}

impl<V> FusedIterator for Scan<'_, V> {}
