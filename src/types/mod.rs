//! Core data types for the query-tally library.

pub mod error;
pub mod record;
pub mod timestamp;

pub use error::{TallyError, TallyResult};
pub use record::Record;
pub use timestamp::{Interval, Timestamp};
