//! High-level operations: frequency tables and the search engine.

pub mod frequency;
pub mod search;

pub use frequency::FrequencyTable;
pub use search::{LoadReport, SearchEngine};
