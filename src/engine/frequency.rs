//! Ordered frequency tables and top-K ranking.

use std::hash::Hash;

use indexmap::IndexMap;

/// Value → occurrence count, kept in first-occurrence order.
///
/// The order matters: [`FrequencyTable::top`] breaks count ties by it, so a
/// table folded from a chronological scan ranks earlier values first.
#[derive(Debug, Clone)]
pub struct FrequencyTable<V> {
    counts: IndexMap<V, u64>,
}

impl<V> FrequencyTable<V>
where
    V: Eq + Hash + Clone,
{
    /// Create a new, empty table.
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    /// Count one more occurrence of `value`.
    pub fn add(&mut self, value: &V) {
        self.add_count(value, 1);
    }

    /// Count `count` more occurrences of `value`.
    ///
    /// The value is cloned only the first time it is seen.
    pub fn add_count(&mut self, value: &V, count: u64) {
        match self.counts.get_mut(value) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(value.clone(), count);
            }
        }
    }

    /// Occurrences of `value`, 0 if never seen.
    pub fn get(&self, value: &V) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, u64)> {
        self.counts.iter().map(|(value, count)| (value, *count))
    }

    /// The `size` most frequent values, count descending.
    ///
    /// Equal counts keep first-occurrence order. A `size` of 0 or an empty
    /// table gives an empty result; a `size` past the number of distinct
    /// values gives all of them.
    pub fn top(&self, size: usize) -> Vec<(V, u64)> {
        if size == 0 || self.counts.is_empty() {
            return Vec::new();
        }

        // (position, value, count): position makes the ordering total, so
        // the unstable selection below behaves like a stable sort on count.
        let by_rank = |a: &(usize, &V, u64), b: &(usize, &V, u64)| {
            b.2.cmp(&a.2).then(a.0.cmp(&b.0))
        };
        let mut ranked: Vec<(usize, &V, u64)> = self
            .counts
            .iter()
            .enumerate()
            .map(|(pos, (value, count))| (pos, value, *count))
            .collect();
        if size < ranked.len() {
            ranked.select_nth_unstable_by(size, by_rank);
            ranked.truncate(size);
        }
        ranked.sort_unstable_by(by_rank);

        ranked
            .into_iter()
            .map(|(_, value, count)| (value.clone(), count))
            .collect()
    }
}

impl<V> Default for FrequencyTable<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> Extend<&'a V> for FrequencyTable<V>
where
    V: Eq + Hash + Clone + 'a,
{
    fn extend<I: IntoIterator<Item = &'a V>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, V> FromIterator<&'a V> for FrequencyTable<V>
where
    V: Eq + Hash + Clone + 'a,
{
    fn from_iter<I: IntoIterator<Item = &'a V>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<V> FromIterator<(V, u64)> for FrequencyTable<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (V, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (value, count) in iter {
            table.add_count(&value, count);
        }
        table
    }
}
