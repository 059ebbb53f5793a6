//! Search engine: folds interval scans into counts and rankings.

use std::cell::Cell;

use crate::config::LoadConfig;
use crate::tree::{IndexTree, Scan};
use crate::types::{Interval, Record, TallyError, TallyResult, Timestamp};

use super::frequency::FrequencyTable;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records stored in the tree.
    pub inserted: usize,
    /// Malformed records that were logged and dropped.
    pub skipped: usize,
}

/// Query-log search engine over a calendar-bucketed [`IndexTree`].
///
/// Meant to be loaded once and then queried; queries never mutate the
/// tree. The engine counts how many scans it has started so callers (and
/// tests) can tell whether a query touched the index at all.
pub struct SearchEngine {
    tree: IndexTree<String>,
    scans: Cell<usize>,
}

impl SearchEngine {
    /// Create an engine with an empty index.
    pub fn new() -> Self {
        Self {
            tree: IndexTree::new(),
            scans: Cell::new(0),
        }
    }

    /// Index a single value at `timestamp`.
    pub fn insert(&mut self, timestamp: Timestamp, value: impl Into<String>) -> TallyResult<()> {
        self.tree.insert(timestamp, value.into())
    }

    /// Index every record. Records must already carry valid timestamps.
    pub fn bulk_load<I>(&mut self, records: I) -> TallyResult<LoadReport>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut report = LoadReport::default();
        for record in records {
            self.tree.insert(record.timestamp, record.value)?;
            report.inserted += 1;
        }
        log::debug!("Bulk loaded {} records", report.inserted);
        Ok(report)
    }

    /// Index records coming from a dataset reader.
    ///
    /// A [`TallyError::MalformedRecord`] aborts the load unless
    /// `config.skip_malformed` is set, in which case it is logged and
    /// counted. Any other error always aborts.
    pub fn load_records<I>(&mut self, records: I, config: &LoadConfig) -> TallyResult<LoadReport>
    where
        I: IntoIterator<Item = TallyResult<Record>>,
    {
        let mut report = LoadReport::default();
        for record in records {
            match record {
                Ok(record) => {
                    self.tree.insert(record.timestamp, record.value)?;
                    report.inserted += 1;
                }
                Err(e @ TallyError::MalformedRecord { .. }) if config.skip_malformed => {
                    log::warn!("Skipping dataset line: {}", e);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        log::debug!(
            "Loaded {} records ({} skipped), {} years indexed",
            report.inserted,
            report.skipped,
            self.tree.year_count()
        );
        Ok(report)
    }

    /// Values indexed at exactly the minute of `timestamp`.
    pub fn lookup(&self, timestamp: Timestamp) -> &[String] {
        self.tree.lookup(timestamp)
    }

    /// Lazily walk every value in `interval`, chronologically.
    pub fn scan(&self, interval: &Interval) -> Scan<'_, String> {
        self.scans.set(self.scans.get() + 1);
        log::trace!("Scanning {}", interval);
        self.tree.scan(interval)
    }

    /// Occurrences of each value in `interval`, in first-occurrence order.
    pub fn frequency_table(&self, interval: &Interval) -> FrequencyTable<String> {
        self.scan(interval).collect()
    }

    /// Total number of values logged in `interval`, duplicates included.
    pub fn occurrence_count(&self, interval: &Interval) -> u64 {
        self.frequency_table(interval).total()
    }

    /// Number of distinct values logged in `interval`.
    pub fn distinct_value_count(&self, interval: &Interval) -> usize {
        self.frequency_table(interval).len()
    }

    /// The `size` most frequent values in `interval`, count descending.
    ///
    /// Ties keep the order in which values first appear in the interval.
    /// A `size` of 0 returns immediately without scanning.
    pub fn popular(&self, interval: &Interval, size: usize) -> Vec<(String, u64)> {
        if size == 0 {
            return Vec::new();
        }
        self.frequency_table(interval).top(size)
    }

    /// Number of scans started since the engine was created.
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    /// Number of indexed values.
    pub fn record_count(&self) -> usize {
        self.tree.len()
    }

    /// The underlying index.
    pub fn tree(&self) -> &IndexTree<String> {
        &self.tree
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
