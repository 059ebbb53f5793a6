//! query-tally: calendar-bucketed index for timestamped query logs.
//!
//! Values (e.g. search queries) are stored in a fixed-depth trie keyed by
//! year, month, day, hour and minute. An interval scan prunes whole
//! buckets that miss the interval, and the search engine folds the scan
//! into occurrence counts and top-K rankings.

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod tree;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{LoadConfig, QueryConfig, TallyConfig, DEFAULT_POPULAR_SIZE};
pub use engine::{FrequencyTable, LoadReport, SearchEngine};
pub use format::{parse_date_prefix, parse_timestamp, DatasetReader, MmapDataset};
pub use tree::{BucketNode, IndexTree, Level, Scan};
pub use types::{Interval, Record, TallyError, TallyResult, Timestamp};
