//! Text input: date prefixes, timestamps and tab-separated datasets.

pub mod dataset;
pub mod mmap;
pub mod prefix;

pub use dataset::{parse_record, DatasetReader};
pub use mmap::MmapDataset;
pub use prefix::{parse_date_prefix, parse_timestamp};
